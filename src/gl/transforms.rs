// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use crate::gl::{Gl, rejected};
use crate::imp::Backend;
use crate::types::{Angle, Axis, Coord, Matrix, MatrixMode, Screencoord};

impl<B: Backend> Gl<B> {
    pub fn mmode(&mut self, mode: i32) {
        match MatrixMode::try_from(mode) {
            Ok(mode) => self.active.mmode(&mut self.context, mode),
            Err(_) => rejected("mmode", "unknown matrix mode"),
        }
    }

    pub fn pushmatrix(&mut self) {
        self.active.pushmatrix(&mut self.context);
    }

    pub fn popmatrix(&mut self) {
        self.active.popmatrix(&mut self.context);
    }

    pub fn loadmatrix(&mut self, matrix: &Matrix) {
        self.active.loadmatrix(&mut self.context, matrix);
    }

    pub fn multmatrix(&mut self, matrix: &Matrix) {
        self.active.multmatrix(&mut self.context, matrix);
    }

    pub fn translate(&mut self, x: Coord, y: Coord, z: Coord) {
        self.active.translate(&mut self.context, x, y, z);
    }

    /// Rotates by `angle` tenths of a degree about `axis` (`'x'`, `'y'` or `'z'`).
    pub fn rotate(&mut self, angle: Angle, axis: char) {
        match Axis::try_from(axis) {
            Ok(axis) => self.active.rotate(&mut self.context, angle, axis),
            Err(_) => rejected("rotate", "axis must be x, y or z"),
        }
    }

    /// Like [Gl::rotate], in floating-point degrees.
    pub fn rot(&mut self, degrees: f32, axis: char) {
        match Axis::try_from(axis) {
            Ok(axis) => self.active.rot(&mut self.context, degrees, axis),
            Err(_) => rejected("rot", "axis must be x, y or z"),
        }
    }

    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        self.active.scale(&mut self.context, x, y, z);
    }

    pub fn ortho2(&mut self, left: Coord, right: Coord, bottom: Coord, top: Coord) {
        if left == right || bottom == top {
            return rejected("ortho2", "degenerate volume");
        }
        self.active.ortho2(&mut self.context, left, right, bottom, top);
    }

    pub fn ortho(
        &mut self,
        left: Coord,
        right: Coord,
        bottom: Coord,
        top: Coord,
        near: Coord,
        far: Coord,
    ) {
        if left == right || bottom == top || near == far {
            return rejected("ortho", "degenerate volume");
        }
        self.active
            .ortho(&mut self.context, left, right, bottom, top, near, far);
    }

    /// `fovy` is in tenths of a degree and must lie strictly between 0 and 180 degrees.
    pub fn perspective(&mut self, fovy: Angle, aspect: f32, near: Coord, far: Coord) {
        if !(2..1800).contains(&fovy) {
            return rejected("perspective", "field of view out of range");
        }
        if aspect <= 0.0 || near == far {
            return rejected("perspective", "degenerate volume");
        }
        self.active
            .perspective(&mut self.context, fovy, aspect, near, far);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn lookat(
        &mut self,
        view_x: Coord,
        view_y: Coord,
        view_z: Coord,
        point_x: Coord,
        point_y: Coord,
        point_z: Coord,
        twist: Angle,
    ) {
        let view = [view_x, view_y, view_z];
        let point = [point_x, point_y, point_z];
        if view == point {
            return rejected("lookat", "viewpoint and reference point coincide");
        }
        self.active.lookat(&mut self.context, view, point, twist);
    }

    pub fn polarview(&mut self, distance: Coord, azimuth: Angle, incidence: Angle, twist: Angle) {
        self.active
            .polarview(&mut self.context, distance, azimuth, incidence, twist);
    }

    pub fn viewport(
        &mut self,
        left: Screencoord,
        right: Screencoord,
        bottom: Screencoord,
        top: Screencoord,
    ) {
        if left > right || bottom > top {
            return rejected("viewport", "inverted extent");
        }
        self.active
            .viewport(&mut self.context, left, right, bottom, top);
    }
}

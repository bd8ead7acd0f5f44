// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use crate::gl::{Gl, rejected};
use crate::imp::Backend;
use crate::types::{BlendFactor, Colorindex, DepthFunction, LightTarget, ShadeModel};

impl<B: Backend> Gl<B> {
    pub fn color(&mut self, index: Colorindex) {
        self.active.color(&mut self.context, index);
    }

    /// Sets the current color from packed `0xAABBGGRR`.
    pub fn cpack(&mut self, rgba: u32) {
        self.active.cpack(&mut self.context, rgba);
    }

    pub fn rgbcolor(&mut self, red: i16, green: i16, blue: i16) {
        self.active.rgbcolor(&mut self.context, red, green, blue);
    }

    pub fn c3f(&mut self, rgb: &[f32; 3]) {
        self.active.c3f(&mut self.context, rgb);
    }

    pub fn linewidth(&mut self, width: i16) {
        if width < 1 {
            return rejected("linewidth", "width must be at least 1");
        }
        self.active.linewidth(&mut self.context, width);
    }

    pub fn zbuffer(&mut self, enabled: bool) {
        self.active.zbuffer(&mut self.context, enabled);
    }

    pub fn shademodel(&mut self, model: i32) {
        match ShadeModel::try_from(model) {
            Ok(model) => self.active.shademodel(&mut self.context, model),
            Err(_) => rejected("shademodel", "unknown shading model"),
        }
    }

    pub fn backface(&mut self, enabled: bool) {
        self.active.backface(&mut self.context, enabled);
    }

    pub fn writemask(&mut self, mask: u32) {
        self.active.writemask(&mut self.context, mask);
    }

    pub fn zfunction(&mut self, function: i32) {
        match DepthFunction::try_from(function) {
            Ok(function) => self.active.zfunction(&mut self.context, function),
            Err(_) => rejected("zfunction", "unknown depth function"),
        }
    }

    pub fn blendfunction(&mut self, source: i32, destination: i32) {
        match (BlendFactor::try_from(source), BlendFactor::try_from(destination)) {
            (Ok(source), Ok(destination)) => {
                self.active
                    .blendfunction(&mut self.context, source, destination)
            }
            _ => rejected("blendfunction", "unknown blend factor"),
        }
    }

    pub fn font(&mut self, index: i16) {
        self.active.font(&mut self.context, index);
    }

    /// Binds a defined material, light or lighting model; index 0 unbinds.
    pub fn lmbind(&mut self, target: i32, index: i16) {
        if index < 0 {
            return rejected("lmbind", "negative definition index");
        }
        match LightTarget::try_from(target) {
            Ok(target) => self.active.lmbind(&mut self.context, target, index),
            Err(_) => rejected("lmbind", "unknown binding target"),
        }
    }

    pub fn clear(&mut self) {
        self.active.clear(&mut self.context);
    }

    pub fn zclear(&mut self) {
        self.active.zclear(&mut self.context);
    }

    /// Clears color to packed `color` and depth to `depth` in one pass.
    pub fn czclear(&mut self, color: u32, depth: i32) {
        self.active.czclear(&mut self.context, color, depth);
    }
}

// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*!
Entry points that never record.

These bypass the dispatch table and act on the backend immediately, even while
an object is open.
*/

use crate::gl::Gl;
use crate::imp::Backend;
use crate::types::{Colorindex, Matrix, MatrixMode, Screencoord};

impl<B: Backend> Gl<B> {
    pub fn swapbuffers(&mut self) {
        self.context.backend.swapbuffers();
    }

    pub fn gflush(&mut self) {
        self.context.backend.gflush();
    }

    pub fn mapcolor(&mut self, index: Colorindex, red: i16, green: i16, blue: i16) {
        self.context.backend.mapcolor(index, red, green, blue);
    }

    /// Defines curve basis `id` for later `curvebasis` calls.
    pub fn defbasis(&mut self, id: i16, basis: &Matrix) {
        self.context.backend.defbasis(id, basis);
    }

    pub fn getcolor(&self) -> Colorindex {
        self.context.backend.getcolor()
    }

    pub fn getmmode(&self) -> MatrixMode {
        self.context.backend.getmmode()
    }

    /// The top of the current matrix stack.
    pub fn getmatrix(&self) -> Matrix {
        self.context.backend.getmatrix()
    }

    pub fn getlwidth(&self) -> i16 {
        self.context.backend.getlwidth()
    }

    pub fn getviewport(&self) -> (Screencoord, Screencoord, Screencoord, Screencoord) {
        self.context.backend.getviewport()
    }
}

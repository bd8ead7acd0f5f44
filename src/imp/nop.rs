// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use crate::imp::Backend;

/// A backend that draws nothing.  Useful for hosts that only record.
#[derive(Debug, Default, Clone, Copy)]
pub struct NopBackend;

impl Backend for NopBackend {}

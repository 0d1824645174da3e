pub(crate) mod calc;
pub(crate) mod clip;
pub(crate) mod result;
pub(crate) mod state;

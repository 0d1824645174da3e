pub(crate) mod measure;
pub(crate) mod parley_measure;
pub(crate) mod script;

pub mod sas;

pub use sas::SasToken;

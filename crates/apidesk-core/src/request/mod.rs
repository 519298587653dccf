pub mod assembler;
pub mod descriptor;
pub mod form;

pub use assembler::{Assembler, append_query};
pub use descriptor::{BodyMode, FormField, FormValue, Payload, RequestDescriptor};
pub use form::FormInput;

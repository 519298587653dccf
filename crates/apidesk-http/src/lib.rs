pub mod console;
pub mod dispatcher;
pub mod error;
pub mod loader;
pub mod locale;

pub use console::Console;
pub use dispatcher::Dispatcher;
pub use error::{DispatchError, LoadError, LocaleError};
pub use loader::DocumentLoader;
pub use locale::{Catalog, LocaleSwitcher, SwitchOutcome};

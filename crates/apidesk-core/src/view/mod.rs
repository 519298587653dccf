pub mod detail;
pub mod model_resolver;
pub mod navigation;
pub mod pane;

pub use detail::build_detail;
pub use model_resolver::{SchemaResolver, resolve_model};
pub use navigation::{NavEntry, NavGroup, Navigation};
pub use pane::{
    Container, DetailPane, ParameterView, PropertyView, REQUEST_CONTAINER, RESPONSE_CONTAINER,
    RenderedModel,
};

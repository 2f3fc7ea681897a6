//! What happens after binding and saving: redirects and page rendering.

pub mod redirect;
pub mod template;

pub use redirect::{Destination, RedirectResolver, REFERER_PARAM};
pub use template::{PageComposer, RenderOptions, StaticFileRenderer, TemplateRenderer, ViewConfig};

mod app;
mod canvas;
mod dom;
mod logging;

pub use app::Annotator;

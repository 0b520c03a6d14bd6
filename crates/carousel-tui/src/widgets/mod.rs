mod carousel_view;
mod status_bar;

pub use carousel_view::{visible_panels, CarouselWidget, PanelSpan};
pub use status_bar::StatusBarWidget;

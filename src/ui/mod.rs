pub mod image_view;
pub mod info_panel;

pub mod frame_loop;
pub mod image_loader;
pub mod painter;

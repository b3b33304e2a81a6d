mod generator_vm;
mod markdown_vm;

pub use generator_vm::{GENERATE_LABEL, GENERATING_LABEL, GeneratorVm, map_generator_vm};
pub use markdown_vm::{markdown_to_html, sanitize_html};

mod generator;

pub use generator::GeneratorView;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

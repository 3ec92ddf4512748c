mod clusters;
mod filter;
mod outcomes;
mod simulate;
mod tooltip;

pub use clusters::clusters;
pub use filter::filter;
pub use outcomes::outcomes;
pub use simulate::simulate;
pub use tooltip::tooltip;

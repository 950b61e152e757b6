mod plot_task;
mod split_task;

pub use plot_task::{PlotReport, PlotTask};
pub use split_task::{SplitReport, SplitTask};

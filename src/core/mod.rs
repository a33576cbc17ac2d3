pub mod period;
pub mod primitives;
pub mod scale;
pub mod series;
pub mod ticker;
pub mod types;

pub use period::PeriodKey;
pub use primitives::{parse_series_timestamp, price_to_cents};
pub use scale::ScaleContext;
pub use series::{Series, SeriesPoint};
pub use ticker::Ticker;
pub use types::{ChartCanvas, Viewport};

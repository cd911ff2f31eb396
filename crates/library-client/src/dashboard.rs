//! Candle dashboard.
//!
//! Selecting a company fetches its candle series and turns it into a
//! Chart.js line chart description. Only one chart is active at a time:
//! [`ChartSlot`] disposes the previous chart on its surface before the next
//! one is drawn, and disposes whatever is left when the slot is dropped.

use crate::client::LibraryClient;
use crate::error::Error;
use crate::types::{CandleResponse, CompanySummary};
use async_trait::async_trait;
use chrono::DateTime;
use serde_json::{Value, json};
use tracing::{debug, error};


/// Stroke colour of the price line.
pub const LINE_COLOR: &str = "rgba(75, 192, 192, 1)";

/// Companies shown when none are configured.
#[must_use]
pub fn default_companies() -> Vec<CompanySummary> {
    [
        ("Apple", "AAPL"),
        ("Google", "GOOGL"),
        ("Microsoft", "MSFT"),
        ("Amazon", "AMZN"),
    ]
    .into_iter()
    .map(|(name, symbol)| CompanySummary {
        name: name.to_string(),
        symbol: symbol.to_string(),
    })
    .collect()
}

// ============================================================================
// Candle Source
// ============================================================================

/// Anything that can produce a candle series for a symbol.
#[async_trait]
pub trait CandleSource: Send + Sync {
    /// Fetches the candle series for `symbol`.
    async fn fetch_candles(&self, symbol: &str) -> Result<CandleResponse, Error>;
}

#[async_trait]
impl CandleSource for LibraryClient {
    async fn fetch_candles(&self, symbol: &str) -> Result<CandleResponse, Error> {
        LibraryClient::fetch_candles(self, symbol).await
    }
}

// ============================================================================
// Line Chart
// ============================================================================

/// Line chart of close prices over time.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    /// Dataset label, the company symbol.
    pub symbol: String,
    /// Time-of-day labels for the x axis.
    pub labels: Vec<String>,
    /// Close prices, one per label.
    pub prices: Vec<f64>,
}

impl LineChart {
    /// Builds a chart from a candle response.
    ///
    /// Returns `None` unless the response status is `ok`. Timestamps and
    /// prices are paired up to the shorter of the two series.
    #[must_use]
    pub fn from_candles(symbol: &str, candles: &CandleResponse) -> Option<Self> {
        if !candles.is_ok() {
            return None;
        }

        let (labels, prices) = candles
            .t
            .iter()
            .zip(&candles.c)
            .map(|(&ts, &price)| (time_label(ts), price))
            .unzip();

        Some(Self {
            symbol: symbol.to_string(),
            labels,
            prices,
        })
    }

    /// Number of points on the chart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Returns true if the chart has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Chart.js configuration for this chart.
    #[must_use]
    pub fn to_config(&self) -> Value {
        json!({
            "type": "line",
            "data": {
                "labels": self.labels,
                "datasets": [{
                    "label": self.symbol,
                    "data": self.prices,
                    "borderColor": LINE_COLOR,
                    "borderWidth": 1,
                    "fill": false,
                }],
            },
            "options": {
                "responsive": true,
                "scales": {
                    "x": { "title": { "display": true, "text": "Time" } },
                    "y": { "title": { "display": true, "text": "Price" } },
                },
            },
        })
    }
}

/// Formats unix seconds as a UTC time of day.
fn time_label(ts: i64) -> String {
    DateTime::from_timestamp(ts, 0)
        .map_or_else(|| ts.to_string(), |dt| dt.format("%H:%M:%S").to_string())
}

// ============================================================================
// Chart Surfaces
// ============================================================================

/// Something charts are drawn on.
///
/// `draw` returns a handle to the drawn chart; that handle must be passed
/// back to `dispose` before the next chart is drawn.
pub trait ChartSurface {
    /// Handle to a drawn chart.
    type Handle;

    /// Draws `chart` and returns its handle.
    fn draw(&mut self, chart: &LineChart) -> Self::Handle;

    /// Releases a chart previously returned by `draw`.
    fn dispose(&mut self, handle: Self::Handle);
}

/// Surface that keeps the Chart.js configuration of the live chart.
#[derive(Debug, Default)]
pub struct ConfigSurface {
    next_handle: u64,
    live: Option<(u64, Value)>,
}

impl ConfigSurface {
    /// Creates an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration of the live chart, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Value> {
        self.live.as_ref().map(|(_, config)| config)
    }

    /// Number of charts drawn so far.
    #[must_use]
    pub fn drawn(&self) -> u64 {
        self.next_handle
    }
}

impl ChartSurface for ConfigSurface {
    type Handle = u64;

    fn draw(&mut self, chart: &LineChart) -> u64 {
        self.next_handle += 1;
        self.live = Some((self.next_handle, chart.to_config()));
        self.next_handle
    }

    fn dispose(&mut self, handle: u64) {
        if matches!(self.live, Some((live, _)) if live == handle) {
            self.live = None;
        }
    }
}

// ============================================================================
// Chart Slot
// ============================================================================

/// Owns the single active chart on a surface.
pub struct ChartSlot<S: ChartSurface> {
    surface: S,
    active: Option<(S::Handle, LineChart)>,
}

impl<S: ChartSurface> ChartSlot<S> {
    /// Creates an empty slot on `surface`.
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            active: None,
        }
    }

    /// Disposes the active chart, then draws `chart` in its place.
    pub fn replace(&mut self, chart: LineChart) {
        self.clear();
        let handle = self.surface.draw(&chart);
        self.active = Some((handle, chart));
    }

    /// Disposes the active chart, if any.
    pub fn clear(&mut self) {
        if let Some((handle, _)) = self.active.take() {
            self.surface.dispose(handle);
        }
    }

    /// The active chart.
    pub fn active(&self) -> Option<&LineChart> {
        self.active.as_ref().map(|(_, chart)| chart)
    }

    /// The underlying surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }
}

impl<S: ChartSurface> Drop for ChartSlot<S> {
    fn drop(&mut self) {
        self.clear();
    }
}

// ============================================================================
// Dashboard
// ============================================================================

/// Company list plus the chart of the selected company.
pub struct Dashboard<C: CandleSource, S: ChartSurface> {
    source: C,
    companies: Vec<CompanySummary>,
    selected: Option<String>,
    chart: ChartSlot<S>,
}

impl<C: CandleSource, S: ChartSurface> Dashboard<C, S> {
    /// Creates a dashboard with nothing selected.
    pub fn new(source: C, companies: Vec<CompanySummary>, surface: S) -> Self {
        Self {
            source,
            companies,
            selected: None,
            chart: ChartSlot::new(surface),
        }
    }

    /// Companies available for selection.
    pub fn companies(&self) -> &[CompanySummary] {
        &self.companies
    }

    /// Currently selected symbol.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Heading shown above the chart.
    pub fn heading(&self) -> String {
        match &self.selected {
            Some(symbol) => format!("Candles for {}", symbol),
            None => "Select a company to see candles".to_string(),
        }
    }

    /// The chart slot.
    pub fn chart(&self) -> &ChartSlot<S> {
        &self.chart
    }

    /// Selects `symbol` and charts its candles.
    ///
    /// Returns `Ok(false)` when the candle response is not `ok`; the active
    /// chart is then left as it was.
    ///
    /// # Errors
    /// Returns error if the candle fetch fails.
    pub async fn select(&mut self, symbol: &str) -> Result<bool, Error> {
        self.selected = Some(symbol.to_string());

        let candles = self.source.fetch_candles(symbol).await?;
        let Some(chart) = LineChart::from_candles(symbol, &candles) else {
            error!(symbol, status = %candles.s, "Error fetching candles");
            return Ok(false);
        };

        debug!(symbol, points = chart.len(), "Rendering candle chart");
        self.chart.replace(chart);
        Ok(true)
    }
}

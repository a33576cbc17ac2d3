use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use price_chart::api::{
    ChartConfig, ChartView, LabelTimeZone, NoDataReason, PayloadPoint, PriceChart,
    ResponseOutcome, SeriesFetcher, SeriesPayload, SeriesRequest, SeriesSource,
};
use price_chart::core::{PeriodKey, Ticker};
use price_chart::error::FetchError;
use price_chart::render::NullRenderer;

/// Scripted backend: each ticker answers after its own delay.
#[derive(Default)]
struct ScriptedSource {
    replies: HashMap<String, (Duration, Result<Vec<f64>, FetchError>)>,
}

impl ScriptedSource {
    fn reply(mut self, ticker: &str, delay_ms: u64, closes: &[f64]) -> Self {
        self.replies.insert(
            ticker.to_owned(),
            (Duration::from_millis(delay_ms), Ok(closes.to_vec())),
        );
        self
    }

    fn fail(mut self, ticker: &str, delay_ms: u64, err: FetchError) -> Self {
        self.replies
            .insert(ticker.to_owned(), (Duration::from_millis(delay_ms), Err(err)));
        self
    }
}

impl SeriesSource for ScriptedSource {
    fn fetch_series(
        &self,
        request: &SeriesRequest,
    ) -> impl Future<Output = Result<SeriesPayload, FetchError>> + Send {
        let reply = self.replies.get(request.ticker.as_str()).cloned();
        let period = request.period;
        async move {
            let Some((delay, result)) = reply else {
                return Err(FetchError::Status {
                    status: 404,
                    detail: Some("unknown ticker".to_owned()),
                });
            };
            tokio::time::sleep(delay).await;
            let closes = result?;
            Ok(SeriesPayload {
                period: Some(period.code().to_owned()),
                data: Some(
                    closes
                        .into_iter()
                        .enumerate()
                        .map(|(day, close)| PayloadPoint {
                            date: format!("2024-01-{:02}", day + 1),
                            close,
                            open: None,
                            high: None,
                            low: None,
                            volume: None,
                        })
                        .collect(),
                ),
                ..SeriesPayload::default()
            })
        }
    }
}

fn chart() -> PriceChart<NullRenderer> {
    let config = ChartConfig::default().with_timezone(LabelTimeZone::Utc);
    PriceChart::new(NullRenderer::default(), config).expect("chart init")
}

fn ticker(symbol: &str) -> Ticker {
    Ticker::parse(symbol).expect("valid ticker")
}

#[tokio::test(start_paused = true)]
async fn slow_older_response_cannot_overwrite_newer_series() {
    let fetcher = SeriesFetcher::new(
        ScriptedSource::default()
            .reply("AAPL", 300, &[1.0, 2.0])
            .reply("MSFT", 100, &[10.0, 20.0, 30.0]),
    );
    let mut chart = chart();

    let first = chart.select_ticker(ticker("AAPL")).expect("first ticket");
    let second = chart.select_ticker(ticker("MSFT")).expect("second ticket");
    assert!(chart.is_loading());

    let (older, newer) = tokio::join!(fetcher.fetch(&first), fetcher.fetch(&second));

    // Arrival order: MSFT (100 ms) then AAPL (300 ms).
    assert_eq!(chart.apply_response(&second, newer), ResponseOutcome::Applied);
    assert_eq!(chart.apply_response(&first, older), ResponseOutcome::Stale);

    let series = chart.series().expect("series applied");
    assert_eq!(series.closes(), vec![10.0, 20.0, 30.0]);
    assert_eq!(chart.ticker().map(Ticker::as_str), Some("MSFT"));
}

#[tokio::test(start_paused = true)]
async fn older_response_arriving_first_is_dropped_while_newer_is_pending() {
    let fetcher = SeriesFetcher::new(
        ScriptedSource::default()
            .reply("AAPL", 50, &[1.0, 2.0])
            .reply("MSFT", 400, &[10.0, 20.0]),
    );
    let mut chart = chart();

    let first = chart.select_ticker(ticker("AAPL")).expect("first ticket");
    let second = chart.select_ticker(ticker("MSFT")).expect("second ticket");

    let older = fetcher.fetch(&first).await;
    assert_eq!(chart.apply_response(&first, older), ResponseOutcome::Stale);
    assert!(chart.is_loading());

    let newer = fetcher.fetch(&second).await;
    assert_eq!(chart.apply_response(&second, newer), ResponseOutcome::Applied);
    assert_eq!(
        chart.series().expect("series applied").closes(),
        vec![10.0, 20.0]
    );
}

#[tokio::test(start_paused = true)]
async fn period_switch_supersedes_in_flight_request() {
    let fetcher = SeriesFetcher::new(ScriptedSource::default().reply("AAPL", 200, &[5.0, 6.0]));
    let mut chart = chart();

    let monthly = chart.select_ticker(ticker("AAPL")).expect("ticket");
    assert_eq!(monthly.request().period, PeriodKey::Month);
    let yearly = chart.select_period(PeriodKey::Year).expect("ticket");

    let stale = fetcher.fetch(&monthly).await;
    assert_eq!(chart.apply_response(&monthly, stale), ResponseOutcome::Stale);

    assert_eq!(chart.load(&fetcher, yearly).await, ResponseOutcome::Applied);
    assert_eq!(chart.period(), PeriodKey::Year);
}

#[tokio::test(start_paused = true)]
async fn the_same_ticket_applies_only_once() {
    let fetcher = SeriesFetcher::new(ScriptedSource::default().reply("AAPL", 10, &[1.0, 2.0]));
    let mut chart = chart();

    let ticket = chart.select_ticker(ticker("AAPL")).expect("ticket");
    let result = fetcher.fetch(&ticket).await;
    assert_eq!(
        chart.apply_response(&ticket, result.clone()),
        ResponseOutcome::Applied
    );
    assert_eq!(chart.apply_response(&ticket, result), ResponseOutcome::Stale);
}

#[tokio::test(start_paused = true)]
async fn failures_map_to_no_data_without_retry() {
    let fetcher = SeriesFetcher::new(ScriptedSource::default().fail(
        "AAPL",
        20,
        FetchError::Network("connection reset".to_owned()),
    ));
    let mut chart = chart();

    let ticket = chart.select_ticker(ticker("AAPL")).expect("ticket");
    assert_eq!(chart.load(&fetcher, ticket).await, ResponseOutcome::Applied);

    assert!(matches!(
        chart.view(),
        ChartView::NoData(NoDataReason::Failed(FetchError::Network(_)))
    ));
    assert!(chart.series().is_none());
}

#[tokio::test(start_paused = true)]
async fn clearing_the_ticker_abandons_the_outstanding_request() {
    let fetcher = SeriesFetcher::new(ScriptedSource::default().reply("AAPL", 30, &[1.0, 2.0]));
    let mut chart = chart();

    let ticket = chart.select_ticker(ticker("AAPL")).expect("ticket");
    chart.clear_ticker();

    let result = fetcher.fetch(&ticket).await;
    assert_eq!(chart.apply_response(&ticket, result), ResponseOutcome::Stale);
    assert_eq!(chart.view(), &ChartView::Idle);
}

#[tokio::test(start_paused = true)]
async fn unscalable_series_is_reported_as_malformed() {
    let fetcher = SeriesFetcher::new(ScriptedSource::default().reply("AAPL", 5, &[1e308, -1e308]));
    let mut chart = chart();

    let ticket = chart.select_ticker(ticker("AAPL")).expect("ticket");
    assert_eq!(chart.load(&fetcher, ticket).await, ResponseOutcome::Applied);

    assert!(matches!(
        chart.view(),
        ChartView::NoData(NoDataReason::Failed(FetchError::Malformed(_)))
    ));
    assert!(chart.series().is_none());
}

use energy_series::{MathError, SeriesError};
use forecast_client::ClientError;
use forecast_dashboard::{DashboardError, ErrorPresentation};
use rstest::rstest;

#[test]
fn test_error_conversion() {
    let err = DashboardError::from(ClientError::Network("timed out".to_string()));
    assert!(matches!(err, DashboardError::ClientUnavailable(_)));

    let err = DashboardError::from(SeriesError::EmptySeries);
    assert!(matches!(err, DashboardError::Series(SeriesError::EmptySeries)));

    let err = DashboardError::from(MathError::DivisionByZero("zero base".to_string()));
    assert!(matches!(err, DashboardError::Math(_)));
}

#[test]
fn test_error_display() {
    let err = DashboardError::OutOfRange {
        requested: 2031,
        min: 2025,
        max: 2029,
    };
    assert_eq!(
        err.to_string(),
        "Year 2031 is out of range: choose a year between 2025 and 2029"
    );

    let err = DashboardError::from(ClientError::Backend {
        code: 404,
        message: "No active model found".to_string(),
    });
    let text = err.to_string();
    assert!(text.contains("Forecast backend unavailable"));
    assert!(text.contains("No active model found"));
}

#[rstest]
#[case(DashboardError::NoBaseline, ErrorPresentation::InlineMessage)]
#[case(
    DashboardError::OutOfRange { requested: 2024, min: 2025, max: 2029 },
    ErrorPresentation::InlineMessage
)]
#[case(
    DashboardError::ClientUnavailable(ClientError::Network("refused".to_string())),
    ErrorPresentation::DismissibleNotice
)]
#[case(
    DashboardError::ClientUnavailable(ClientError::Backend { code: 500, message: "boom".to_string() }),
    ErrorPresentation::DismissibleNotice
)]
#[case(
    DashboardError::ClientUnavailable(ClientError::InvalidData(SeriesError::EmptySeries)),
    ErrorPresentation::HardFailure
)]
#[case(
    DashboardError::ClientUnavailable(ClientError::InvalidRequest("years".to_string())),
    ErrorPresentation::InlineMessage
)]
#[case(
    DashboardError::Series(SeriesError::NonContiguous { expected: 2025, found: 2027 }),
    ErrorPresentation::HardFailure
)]
#[case(DashboardError::Config("bad".to_string()), ErrorPresentation::HardFailure)]
fn test_presentation(#[case] err: DashboardError, #[case] expected: ErrorPresentation) {
    assert_eq!(err.presentation(), expected);
}

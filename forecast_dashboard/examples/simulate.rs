use forecast_client::{HttpForecastClient, Scenario};
use forecast_dashboard::{logging, DashboardConfig, DashboardSession, InMemoryBackend, SimulationOutcome};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    // Point ENERGY_DASHBOARD_BASE_URL at a running backend
    let config = DashboardConfig::from_env()?;
    println!("Using backend at {}", config.client.base_url);

    let client = Arc::new(HttpForecastClient::new(config.client.clone())?);
    let backend = InMemoryBackend::new();
    let session = DashboardSession::new(client, backend.clone(), config);

    let baseline = session.load().await?;
    println!(
        "Model {} ({} accuracy)",
        baseline.metrics.order,
        baseline.metrics.accuracy_summary()
    );
    match &baseline.stats {
        Some(stats) => {
            println!(
                "Official projection {}: {} ({})",
                stats.projection_year,
                stats.projection_display(),
                stats.growth_rate_display()
            );
            println!("{}", stats.narrative_text);
        }
        None => println!("No official prediction available yet"),
    }

    let Some(year) = baseline.default_year else {
        println!("The backend allows no simulation years");
        return Ok(());
    };

    for scenario in Scenario::ALL {
        match session.run_simulation(scenario, year).await? {
            SimulationOutcome::Applied(view) => {
                let versus_official = view
                    .stats
                    .change_from_official_display()
                    .unwrap_or_else(|| "n/a".to_string());
                println!(
                    "{:<12} {}: {:>12} ({} vs {}, {} vs official)",
                    scenario.to_string(),
                    view.requested_year,
                    view.stats.projection_display(),
                    view.stats.growth_rate_display(),
                    view.stats.base_year,
                    versus_official
                );
            }
            SimulationOutcome::Superseded => println!("{}: superseded", scenario),
        }
    }

    session.reset().await?;
    println!(
        "Reset to official forecast, {} chart(s) live",
        backend.live_count()
    );

    Ok(())
}

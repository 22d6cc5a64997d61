use elevator_config::AppConfig;
use elevator_sim::{shutdown_channel, Application};

fn create_config(elevators: usize, requests: usize) -> AppConfig {
    let mut config = AppConfig::default();
    config.elevator.count = elevators;
    config.simulation.request_count = requests;
    config.simulation.seed = Some(7);
    config
}

#[tokio::test(start_paused = true)]
async fn test_application_registers_elevators_in_building() {
    let config = create_config(3, 0);
    let (min_floor, max_floor) = (config.building.min_floor, config.building.max_floor);

    let app = Application::new(config).await.unwrap();
    let status = app.dispatcher().status().await;

    assert_eq!(status.len(), 3);
    assert_eq!(
        status.iter().map(|s| s.id).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    for elevator in &status {
        assert!(elevator.current_floor >= min_floor && elevator.current_floor <= max_floor);
        assert!(!elevator.busy);
    }
}

#[tokio::test(start_paused = true)]
async fn test_simulation_runs_to_completion() {
    let app = Application::new(create_config(2, 6)).await.unwrap();
    let (_trigger, listener) = shutdown_channel();

    let summary = app.run(listener).await.unwrap();

    assert_eq!(summary.submitted, 6);
    assert_eq!(summary.assigned + summary.dropped + summary.rejected, 6);
    // 初始所有电梯都空闲，第一个请求一定被分配
    assert!(summary.assigned >= 1);
    assert_eq!(summary.rejected, 0);
    assert!(!summary.interrupted);
    assert!(!summary.report.already_shut_down);
    assert_eq!(summary.report.elevators.len(), 2);
    assert!(!summary.report.forced());
}

#[tokio::test(start_paused = true)]
async fn test_simulation_stops_on_shutdown_signal() {
    let app = Application::new(create_config(2, 10)).await.unwrap();
    let (trigger, listener) = shutdown_channel();
    trigger.trigger();

    let summary = app.run(listener).await.unwrap();

    assert!(summary.interrupted);
    assert_eq!(summary.submitted, 0);
    assert!(!summary.report.already_shut_down);
}

#[tokio::test(start_paused = true)]
async fn test_seeded_runs_are_reproducible() {
    let first = Application::new(create_config(3, 0)).await.unwrap();
    let second = Application::new(create_config(3, 0)).await.unwrap();

    let floors = |status: Vec<elevator_domain::ElevatorStatus>| {
        status.into_iter().map(|s| s.current_floor).collect::<Vec<_>>()
    };

    assert_eq!(
        floors(first.dispatcher().status().await),
        floors(second.dispatcher().status().await)
    );
}

#[tokio::test(start_paused = true)]
async fn test_signal_during_settle_time_ends_run_early() {
    let app = Application::new(create_config(2, 3)).await.unwrap();
    let (trigger, listener) = shutdown_channel();

    tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_millis(1500)).await;
        trigger.trigger();
    });

    let started = tokio::time::Instant::now();
    let summary = app.run(listener).await.unwrap();

    assert!(summary.interrupted);
    assert_eq!(summary.submitted, 3);
    // 未等满 5 秒的 settle time
    assert!(started.elapsed() < std::time::Duration::from_millis(5000));
}

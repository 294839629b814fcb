use devswap::infra::Settings;
use devswap::services::{ContainerService, DevContainerOrchestrator, DevContainerRequest};
use devswap::test_support::MockRuntime;
use devswap::{generate_run_args, parse_inspect_json};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn orchestrator(timeout: Duration) -> (DevContainerOrchestrator, Arc<MockRuntime>) {
    let mock = Arc::new(MockRuntime::new());
    mock.add_inspect("app", r#"[{"Name": "/app", "Config": {"Image": "alpine"}}]"#);
    let settings = Settings {
        ready_timeout: timeout,
        ready_interval: Duration::from_millis(10),
        ..Settings::default()
    };
    let service = Arc::new(ContainerService::new(mock.clone()));
    (DevContainerOrchestrator::new(service, settings), mock)
}

fn request() -> DevContainerRequest {
    DevContainerRequest {
        source: "app".to_string(),
        dev_name: "app-dev".to_string(),
        swap_dir: None,
        debugger: false,
        inject: None,
    }
}

#[test]
fn test_readiness_poll_is_bounded() {
    // A container that never comes up must not hang the workflow
    let (orchestrator, mock) = orchestrator(Duration::from_millis(60));
    mock.set_start_on_run(false);

    let start = Instant::now();
    let result = orchestrator.create(&request());
    let duration = start.elapsed();

    assert!(result.is_err());
    assert!(duration >= Duration::from_millis(60));
    assert!(duration < Duration::from_secs(1), "poll loop hung: {duration:?}");

    let polls = mock
        .get_commands()
        .iter()
        .filter(|c| *c == "is_running:app-dev")
        .count();
    assert!(polls >= 2, "expected repeated polling, got {polls}");
}

#[test]
fn test_readiness_tolerates_slow_start() {
    let (orchestrator, mock) = orchestrator(Duration::from_secs(1));
    mock.set_start_on_run(false);

    let mock_clone = mock.clone();
    let flipper = thread::spawn(move || {
        // Wait for the run to happen, then report running
        let deadline = Instant::now() + Duration::from_millis(500);
        while !mock_clone.has_container("app-dev") && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(2));
        }
        thread::sleep(Duration::from_millis(30));
        mock_clone.set_running("app-dev", true);
    });

    let result = orchestrator.create(&request());
    flipper.join().unwrap();

    assert!(result.is_ok(), "{result:?}");
}

#[test]
fn test_readiness_survives_transient_query_errors() {
    let (orchestrator, mock) = orchestrator(Duration::from_millis(60));
    mock.set_fail_on("is_running");

    let err = orchestrator.create(&request()).unwrap_err();
    assert!(format!("{err:#}").contains("Timeout"));
}

#[test]
fn test_parse_and_generate_from_many_threads() {
    let document = r#"[{"Name": "/svc", "Config": {"Image": "busybox", "Cmd": ["sleep", "60"]},
        "NetworkSettings": {"Ports": {"80/tcp": [{"HostPort": "8000"}]}}}]"#;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            thread::spawn(move || {
                let spec = parse_inspect_json(document).unwrap();
                generate_run_args(&spec, None)
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(
            handle.join().unwrap(),
            vec!["--name", "svc", "-p", "8000:80", "busybox", "sleep", "60"]
        );
    }
}

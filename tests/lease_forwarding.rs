use async_trait::async_trait;
use kvcoord::{
    try_start_lease_server, ApplyGate, ApplyWait, ApplyWaitError, CommittedIndexGate, HyperRoundTripper,
    InMemoryLessor, LeaseClientError, LeaseForwardClient, LeaseId, LeaseServerConfig, LeaseServerHandle,
    LeaseServerOptions, RaftStatus, LEASE_PREFIX,
};
use std::error::Error;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::time::Duration;
use tokio_util::sync::CancellationToken;

struct FixedStatus;

impl RaftStatus for FixedStatus {
    fn term(&self) -> u64 {
        3
    }

    fn revision(&self) -> i64 {
        17
    }
}

struct OpenGate;

#[async_trait]
impl ApplyGate for OpenGate {
    async fn wait_for_applied(&self) -> Result<(), ApplyWaitError> {
        Ok(())
    }
}

async fn start_server<G: ApplyGate + 'static>(
    lessor: Arc<InMemoryLessor>,
    gate: G,
    apply_timeout: Option<Duration>,
) -> Result<LeaseServerHandle, Box<dyn Error>> {
    let handle = try_start_lease_server(LeaseServerConfig {
        socket_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 0)),
        cluster_id: 11,
        member_id: 22,
        lessor,
        apply_gate: gate,
        raft_status: Arc::new(FixedStatus),
        info_logger: test_logger(),
        options: LeaseServerOptions { apply_timeout },
    })
    .await?;

    Ok(handle)
}

fn client() -> LeaseForwardClient<HyperRoundTripper> {
    LeaseForwardClient::new(test_logger(), Arc::new(HyperRoundTripper::new()))
}

fn test_logger() -> slog::Logger {
    slog::Logger::root(slog::Discard, slog::o!())
}

#[tokio::test]
async fn renew_and_lookup_over_http() -> Result<(), Box<dyn Error>> {
    let lessor = Arc::new(InMemoryLessor::new());
    let id = LeaseId::new(42);
    lessor.grant(id, 30)?;
    lessor.attach(id, "a")?;
    lessor.attach(id, "b")?;
    let server = start_server(lessor, OpenGate, None).await?;
    let cancel = CancellationToken::new();

    let ttl = client().renew(&cancel, id, &server.url()).await?;
    assert_eq!(ttl, 30);

    let with_keys = client().time_to_live(&cancel, id, true, &server.url()).await?;
    assert_eq!(with_keys.lease_id, id);
    assert_eq!(with_keys.granted_ttl, 30);
    assert!(with_keys.ttl > 25 && with_keys.ttl <= 30, "ttl = {}", with_keys.ttl);
    assert_eq!(with_keys.keys, vec![b"a".to_vec(), b"b".to_vec()]);
    assert_eq!(with_keys.header.cluster_id, 11);
    assert_eq!(with_keys.header.member_id, 22);
    assert_eq!(with_keys.header.raft_term, 3);
    assert_eq!(with_keys.header.revision, 17);

    let without_keys = client().time_to_live(&cancel, id, false, &server.url()).await?;
    assert!(without_keys.keys.is_empty());

    server.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn unknown_lease_is_not_found() -> Result<(), Box<dyn Error>> {
    let server = start_server(Arc::new(InMemoryLessor::new()), OpenGate, None).await?;
    let cancel = CancellationToken::new();

    let err = client().renew(&cancel, LeaseId::new(1), &server.url()).await.unwrap_err();
    assert!(matches!(err, LeaseClientError::NotFound), "{:?}", err);

    let err = client()
        .time_to_live(&cancel, LeaseId::new(1), true, &server.url())
        .await
        .unwrap_err();
    assert!(matches!(err, LeaseClientError::NotFound), "{:?}", err);

    server.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn lagging_node_times_out_with_408() -> Result<(), Box<dyn Error>> {
    let lessor = Arc::new(InMemoryLessor::new());
    let id = LeaseId::new(5);
    lessor.grant(id, 30)?;

    // Applied index 0 and a committed index that never gets applied.
    let gate = CommittedIndexGate::new(Arc::new(ApplyWait::new(0)), || 10);
    let server = start_server(lessor, gate, Some(Duration::from_millis(50))).await?;

    let err = client()
        .renew(&CancellationToken::new(), id, &server.url())
        .await
        .unwrap_err();
    assert!(matches!(err, LeaseClientError::HttpTimeout), "{:?}", err);

    server.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn gate_releases_once_apply_catches_up() -> Result<(), Box<dyn Error>> {
    let lessor = Arc::new(InMemoryLessor::new());
    let id = LeaseId::new(6);
    lessor.grant(id, 20)?;

    let apply_wait = Arc::new(ApplyWait::new(0));
    let gate = CommittedIndexGate::new(apply_wait.clone(), || 3);
    let server = start_server(lessor, gate, Some(Duration::from_secs(5))).await?;

    let trigger = apply_wait.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.trigger(3);
    });

    let ttl = client().renew(&CancellationToken::new(), id, &server.url()).await?;
    assert_eq!(ttl, 20);

    server.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn non_post_is_rejected() -> Result<(), Box<dyn Error>> {
    let server = start_server(Arc::new(InMemoryLessor::new()), OpenGate, None).await?;

    let uri: hyper::Uri = format!("{}{}", server.url(), LEASE_PREFIX).parse()?;
    let response = hyper::Client::new().get(uri).await?;
    assert_eq!(response.status(), hyper::StatusCode::METHOD_NOT_ALLOWED);

    server.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn server_stops_on_shutdown() -> Result<(), Box<dyn Error>> {
    let lessor = Arc::new(InMemoryLessor::new());
    let id = LeaseId::new(8);
    lessor.grant(id, 30)?;
    let server = start_server(lessor, OpenGate, None).await?;
    let url = server.url();

    server.shutdown().await;

    let err = client()
        .renew(&CancellationToken::new(), id, &url)
        .await
        .unwrap_err();
    assert!(matches!(err, LeaseClientError::Transport(_)), "{:?}", err);
    Ok(())
}

use kvcoord::{
    try_start_lease_server, ApplyWait, CommittedIndexGate, HyperRoundTripper, InMemoryLessor, LeaseForwardClient,
    LeaseId, LeaseServerConfig, LeaseServerOptions, RaftStatus,
};
use slog::Drain;
use std::error::Error;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::time::Duration;
use tokio_util::sync::CancellationToken;

/// Single-node demo: serves lease forwarding on localhost and renews a lease through it the way a
/// follower would.
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let logger = create_root_logger("node-1");

    let apply_wait = Arc::new(ApplyWait::new(0));
    let committed = Arc::new(AtomicU64::new(0));
    tokio::spawn(fake_apply_loop(apply_wait.clone(), committed.clone()));

    let lessor = Arc::new(InMemoryLessor::new());
    let lease_id = LeaseId::new(0x1234);
    lessor.grant(lease_id, 30)?;
    lessor.attach(lease_id, "/services/demo")?;

    let gate_committed = committed.clone();
    let server = try_start_lease_server(LeaseServerConfig {
        socket_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 0)),
        cluster_id: 1,
        member_id: 1,
        lessor: lessor.clone(),
        apply_gate: CommittedIndexGate::new(apply_wait.clone(), move || gate_committed.load(Ordering::SeqCst)),
        raft_status: Arc::new(LocalStatus { apply_wait, term: 1 }),
        info_logger: logger.clone(),
        options: LeaseServerOptions::default(),
    })
    .await?;

    let client = LeaseForwardClient::new(logger.clone(), Arc::new(HyperRoundTripper::new()));
    let cancel = CancellationToken::new();
    let leader_url = server.url();

    let ttl = client.renew(&cancel, lease_id, &leader_url).await?;
    slog::info!(logger, "Renewed lease {:?}, ttl {}s", lease_id, ttl);

    let lookup = client.time_to_live(&cancel, lease_id, true, &leader_url).await?;
    slog::info!(
        logger,
        "Lease {:?} has {}s of {}s left, keys {:?}",
        lease_id,
        lookup.ttl,
        lookup.granted_ttl,
        lookup
            .keys
            .iter()
            .map(|k| String::from_utf8_lossy(k).into_owned())
            .collect::<Vec<_>>()
    );

    slog::info!(logger, "Serving lease forwarding at {}; ctrl-c to stop", leader_url);
    tokio::signal::ctrl_c().await?;
    cancel.cancel();
    server.shutdown().await;

    Ok(())
}

/// Stands in for consensus: commits and applies one entry every 100ms.
async fn fake_apply_loop(apply_wait: Arc<ApplyWait>, committed: Arc<AtomicU64>) {
    let mut interval = tokio::time::interval(Duration::from_millis(100));
    loop {
        interval.tick().await;
        let index = committed.fetch_add(1, Ordering::SeqCst) + 1;
        apply_wait.trigger(index);
    }
}

struct LocalStatus {
    apply_wait: Arc<ApplyWait>,
    term: u64,
}

impl RaftStatus for LocalStatus {
    fn term(&self) -> u64 {
        self.term
    }

    fn revision(&self) -> i64 {
        self.apply_wait.last_applied() as i64
    }
}

fn create_root_logger(member_name: &str) -> slog::Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).use_file_location().build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    slog::Logger::root(drain, slog::o!("Member" => member_name.to_string()))
}

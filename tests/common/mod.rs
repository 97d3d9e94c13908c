use std::sync::{LazyLock, Mutex};

use dynamic_connectivity::DynamicConnectivity;
use flexi_logger::{Logger, LoggerHandle};

pub mod brute_force;
pub use brute_force::BruteForceGraph;

#[allow(dead_code)]
pub static LOGGER: LazyLock<Mutex<LoggerHandle>> = LazyLock::new(|| {
    Mutex::new(
        Logger::try_with_env_or_str("info")
            .unwrap()
            .write_mode(flexi_logger::WriteMode::SupportCapture)
            .log_to_stdout()
            .set_palette("196;208;3;7;8".to_owned())
            .format(|w, now, record| {
                let style = flexi_logger::style(record.level());
                write!(
                    w,
                    "{} {pref}[{}] {}{suf}",
                    now.format("%H:%M:%S"),
                    &record.level().as_str()[0..1],
                    record.args(),
                    pref = style.prefix(),
                    suf = style.suffix(),
                )
            })
            .start()
            .unwrap(),
    )
});

#[allow(dead_code)]
pub fn init_logger() {
    let _ = &*LOGGER;
}

/// Asserts that `graph` and `oracle` agree on connectivity for every pair of vertices and on
/// the total component count.
#[allow(dead_code)]
pub fn assert_same_connectivity<L: dynamic_connectivity::lists::Lists<dynamic_connectivity::euler_tour_tree::MarkUnion>>(
    graph: &mut dynamic_connectivity::dynamic_graph::DynamicGraph<L>,
    oracle: &mut BruteForceGraph,
) {
    assert_eq!(graph.component_count(), oracle.component_count());
    let n = oracle.num_vertices();
    for u in 0..n {
        for v in 0..n {
            assert_eq!(
                graph.is_connected(u, v),
                oracle.is_connected(u, v),
                "is_connected({u}, {v}) disagrees"
            );
        }
    }
}

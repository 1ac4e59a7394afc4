// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::describe_counter;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::info;

pub fn init_metrics() {
    let builder = PrometheusBuilder::new();
    let addr: SocketAddr = "0.0.0.0:9000".parse().expect("Invalid metrics address");

    // Start the exporter
    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = builder.with_http_listener(addr).install() {
        tracing::warn!("Failed to install Prometheus recorder: {}. This might happen if the port is already in use.", e);
    }

    describe_counter!(
        "destination_searches_total",
        "Total number of destination searches dispatched"
    );
    describe_counter!(
        "destination_cache_hits_total",
        "Cache hits per destination source"
    );
    describe_counter!(
        "destination_cache_misses_total",
        "Cache misses per destination source"
    );
    describe_counter!(
        "destination_source_failures_total",
        "Per-source request failures (transport, HTTP status, payload)"
    );
    describe_counter!(
        "destination_source_timeouts_total",
        "Per-source requests abandoned by the timeout race"
    );

    info!("Metrics exporter listening on {}", addr);
}

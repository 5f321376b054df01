// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` 未设置时使用的过滤规则
pub const DEFAULT_FILTER: &str = "info,portal_sync=debug";

/// 初始化日志
///
/// `RUST_LOG` 覆盖默认过滤规则；`LOG_FORMAT=json` 时输出 JSON 行，便于日志采集。
pub fn init_telemetry() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    if json_requested() {
        registry.with(fmt::layer().json().with_current_span(false)).init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}

fn json_requested() -> bool {
    std::env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

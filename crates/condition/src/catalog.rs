use crate::schema::ConditionType;

pub const NRQL_DURATIONS: &[u32] = &[1, 2, 3, 4, 5, 10, 15, 30, 60, 120];
pub const METRIC_DURATIONS: &[u32] = &[5, 10, 15, 30, 60, 120];
pub const SINCE_VALUES: &[u32] = &[1, 2, 3, 4, 5];

/// Metric names the alerting API accepts for each condition family.
pub fn metrics_for(condition_type: ConditionType) -> &'static [&'static str] {
    match condition_type {
        ConditionType::ApmAppMetric => &[
            "apdex",
            "error_percentage",
            "response_time_background",
            "response_time_web",
            "throughput_background",
            "throughput_web",
            "user_defined",
        ],
        ConditionType::ApmKtMetric => &[
            "apdex",
            "error_count",
            "error_percentage",
            "response_time",
            "throughput",
        ],
        ConditionType::BrowserMetric => &[
            "ajax_response_time",
            "ajax_throughput",
            "dom_processing",
            "end_user_apdex",
            "network",
            "page_rendering",
            "page_view_throughput",
            "page_views_with_js_errors",
            "request_queuing",
            "total_page_load",
            "user_defined",
            "web_application",
        ],
        ConditionType::MobileMetric => &[
            "database",
            "images",
            "json",
            "mobile_crash_rate",
            "network_error_percentage",
            "network",
            "status_error_percentage",
            "user_defined",
            "view_loading",
        ],
        ConditionType::ServersMetric => &[
            "cpu_percentage",
            "disk_io_percentage",
            "fullest_disk_percentage",
            "load_average_one_minute",
            "memory_percentage",
            "user_defined",
        ],
    }
}

pub fn is_known_metric(condition_type: ConditionType, metric: &str) -> bool {
    metrics_for(condition_type).contains(&metric)
}

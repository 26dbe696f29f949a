#[macro_export]
macro_rules! log_err {
    // Usage: log_err!("saving project", &draft);
    ($context:expr, $params:expr) => {{
        let location = format!("{}:{}", file!(), line!());

        let params_json = ::serde_json::to_value($params)
            .unwrap_or(::serde_json::Value::Null);

        ::log::error!("{} [{}] params={}", $context, location, params_json);
    }};
}

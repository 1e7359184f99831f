pub fn default_gateway_port() -> u16 {
    8080
}

pub fn default_events_port() -> u16 {
    8081
}

pub fn default_brokers() -> String {
    "localhost:9092".to_string()
}

pub fn default_log_format() -> String {
    "pretty".to_string()
}

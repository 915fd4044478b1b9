/// Commented default config written on first run.
pub(super) fn default_config_toml() -> &'static str {
    r##"# Lanyard presence configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[presence]
# user_id = ""                              # Discord user id to watch
# api_base = "https://api.lanyard.rest"
# socket_url = "wss://api.lanyard.rest/socket"
# request_timeout_secs = 10                 # 1-120
# connect_timeout_secs = 15                 # 1-120
# reconnect = false                         # reconnect when the socket drops
# reconnect_delay_ms = 1000                 # 100-300000
# max_reconnect_delay_ms = 30000            # 100-300000

[logging]
# level = "info"                            # trace, debug, info, warn, error
"##
}

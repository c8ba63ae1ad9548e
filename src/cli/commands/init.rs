use crate::config::Config;

pub fn cmd_init() -> anyhow::Result<()> {
    if Config::create_default_if_missing()? {
        println!("Created config.toml with default settings.");
        println!("Set tmdb.api_token (or TMDB_API_KEY) before searching.");
    } else {
        println!("config.toml already exists; nothing to do.");
    }
    Ok(())
}

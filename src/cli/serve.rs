//! `feedsmith serve`: HTTP endpoint for a feed definition.

use anyhow::Result;
use feedsmith::{log, serve::FeedServer};
use std::{net::IpAddr, path::Path};

pub fn serve_feed(config: &Path, interface: IpAddr, port: u16) -> Result<()> {
    if !config.is_file() {
        log!("serve"; "{} not found yet, requests will fail until it exists", config.display());
    }

    let server = FeedServer::bind(interface, port, config)?;
    let addr = server.addr();
    log!("serve"; "http://{addr}/feed (rss: /feed.xml, atom: /feed.atom)");

    server.run()
}

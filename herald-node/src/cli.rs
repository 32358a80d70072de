use clap::{Parser, Subcommand};
use console::Style;
use herald_crypto::keys::Keypair;
use herald_relay::builder::{sign_notice, NoticeBuilder};
use herald_relay::clock::{SystemTimeSource, TimeSource};
use herald_relay::codec;
use herald_types::primitives::{short_hash, BlockHeight, PeerId, Timestamp};
use tracing::{info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::checkpoints::parse_hash;
use crate::config::NodeConfig;
use crate::error::NodeError;
use crate::node::{InboundNotice, Node};

#[derive(Parser)]
#[command(
    name = "herald",
    about = "Herald node: signed network notices and chain checkpoints",
    version
)]
pub struct Cli {
    /// Log filter used when RUST_LOG is not set (e.g. "debug", "herald_relay=trace")
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the node, reading hex-encoded notice envelopes from stdin
    Run {
        /// Path to config file
        #[arg(short, long, default_value = "herald.toml")]
        config: String,
        /// Peer id attributed to notices read from stdin
        #[arg(long, default_value_t = 0)]
        peer: PeerId,
    },
    /// Initialize a new node configuration
    Init {
        /// Output directory
        #[arg(short, long, default_value = ".")]
        dir: String,
    },
    /// Generate a new notice signing keypair
    Keygen,
    /// Create and sign a notice, printing the hex-encoded envelope
    Sign {
        /// Hex-encoded 32-byte signing key seed
        #[arg(long)]
        seed: String,
        /// Notice identifier (not used with --sentinel)
        #[arg(long, required_unless_present = "sentinel", conflicts_with = "sentinel")]
        id: Option<i32>,
        /// Priority (higher is more urgent)
        #[arg(long, default_value_t = 0)]
        priority: i32,
        /// Seconds until the notice expires
        #[arg(long, default_value_t = 7 * 24 * 3600)]
        expires_in: u64,
        /// Seconds during which peers are offered the notice
        #[arg(long, default_value_t = 24 * 3600)]
        relay_for: u64,
        /// Language code (0 = English)
        #[arg(long, default_value_t = 0)]
        language: i32,
        /// Short title
        #[arg(long, default_value = "")]
        header: String,
        /// Notice body
        #[arg(long, default_value = "")]
        message: String,
        /// Tray notification text
        #[arg(long, default_value = "")]
        tray: String,
        /// Create a sentinel notice (reserved id, maximal expiration and priority)
        #[arg(long)]
        sentinel: bool,
    },
    /// Authenticate and decode a hex-encoded notice envelope
    Inspect {
        /// Path to config file
        #[arg(short, long, default_value = "herald.toml")]
        config: String,
        /// Hex-encoded notice envelope
        notice: String,
    },
    /// Check a block hash against the checkpoint table
    Checkpoint {
        /// Path to config file
        #[arg(short, long, default_value = "herald.toml")]
        config: String,
        /// Block height
        #[arg(long, allow_negative_numbers = true)]
        height: BlockHeight,
        /// Hex-encoded block hash
        #[arg(long)]
        hash: String,
    },
}

pub async fn run(cli: Cli) -> Result<(), NodeError> {
    match cli.command {
        Command::Run { config, peer } => {
            let config = NodeConfig::load(&config)?;
            let mut node = Node::new(config)?;
            info!(
                network = %node.config().network_id,
                checkpoints = node.checkpoints().is_enabled(),
                "herald node started"
            );

            let mut events = node.subscribe();
            tokio::spawn(async move {
                while let Ok(event) = events.recv().await {
                    info!(hash = %short_hash(&event.hash), change = %event.change, "notice event");
                }
            });

            let (tx, rx) = mpsc::channel(64);
            tokio::spawn(read_envelopes(peer, tx));
            node.run(rx).await
        }
        Command::Init { dir } => {
            NodeConfig::init(&dir)?;
            info!("Node configuration initialized in {}", dir);
            Ok(())
        }
        Command::Keygen => {
            let keypair = Keypair::generate();
            let dim = Style::new().dim();
            println!("{} {}", dim.apply_to("Seed      "), hex::encode(&keypair.seed()[..]));
            println!(
                "{} {}",
                dim.apply_to("Public key"),
                hex::encode(keypair.public_key())
            );
            Ok(())
        }
        Command::Sign {
            seed,
            id,
            priority,
            expires_in,
            relay_for,
            language,
            header,
            message,
            tray,
            sentinel,
        } => {
            let keypair = Keypair::from_seed(&parse_seed(&seed)?);
            let now = SystemTimeSource.now();
            let builder = match id {
                None if sentinel => NoticeBuilder::sentinel(now),
                None => {
                    return Err(NodeError::ConfigError {
                        reason: "--id is required unless --sentinel is given".to_string(),
                    })
                }
                Some(id) => NoticeBuilder::new(id)
                    .created(now)
                    .relay_until(now.saturating_add(relay_for.min(expires_in)))
                    .expiration(now.saturating_add(expires_in))
                    .priority(priority),
            };
            let content = builder
                .language(language)
                .header(header)
                .message(message)
                .tray_notify(tray)
                .build()?;
            let signed = sign_notice(&keypair, &content)?;
            println!("{}", hex::encode(codec::encode_envelope(&signed)?));
            Ok(())
        }
        Command::Inspect { config, notice } => {
            let config = NodeConfig::load(&config)?;
            let bytes = hex::decode(notice.trim()).map_err(|e| NodeError::ConfigError {
                reason: format!("notice is not valid hex: {}", e),
            })?;
            let signed = codec::decode_envelope(&bytes)?;
            let mut node = Node::new(config)?;
            match node.broadcast(signed) {
                Ok(hash) => {
                    let accepted = node.notice(&hash)?.ok_or_else(|| NodeError::ConfigError {
                        reason: "accepted notice missing from store".to_string(),
                    })?;
                    println!("{}", Style::new().green().apply_to("accepted"));
                    let report = serde_json::json!({
                        "hash": hex::encode(hash),
                        "notice": accepted.content(),
                        "created_at": format_time(accepted.content().created),
                        "relay_until_at": format_time(accepted.content().relay_until),
                        "expires_at": format_time(accepted.content().expiration),
                    });
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&report).unwrap_or_default()
                    );
                    Ok(())
                }
                Err(e) => {
                    println!("{} {}", Style::new().red().apply_to("rejected"), e);
                    Err(e)
                }
            }
        }
        Command::Checkpoint {
            config,
            height,
            hash,
        } => {
            let config = NodeConfig::load(&config)?;
            let node = Node::new(config)?;
            let checkpoints = node.checkpoints();
            let ok = checkpoints.check_block(height, &parse_hash(&hash)?);
            let verdict = if ok {
                Style::new().green().apply_to("ok")
            } else {
                Style::new().red().apply_to("mismatch")
            };
            println!("height {}: {}", height, verdict);
            println!(
                "{} {}",
                Style::new().dim().apply_to("estimated total blocks"),
                checkpoints.total_blocks_estimate()
            );
            Ok(())
        }
    }
}

fn parse_seed(s: &str) -> Result<[u8; 32], NodeError> {
    let bytes = hex::decode(s.trim()).map_err(|e| NodeError::ConfigError {
        reason: format!("seed is not valid hex: {}", e),
    })?;
    bytes.try_into().map_err(|b: Vec<u8>| NodeError::ConfigError {
        reason: format!("seed must be 32 bytes, got {}", b.len()),
    })
}

/// Render a notice timestamp as RFC 3339.
fn format_time(ts: Timestamp) -> String {
    i64::try_from(ts)
        .ok()
        .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| ts.to_string())
}

/// Feed envelopes from stdin, one hex string per line, until EOF.
async fn read_envelopes(peer: PeerId, tx: mpsc::Sender<InboundNotice>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!("failed to read stdin: {}", e);
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let notice = match hex::decode(line) {
            Ok(bytes) => match codec::decode_envelope(&bytes) {
                Ok(notice) => notice,
                Err(e) => {
                    warn!("dropping envelope: {}", e);
                    continue;
                }
            },
            Err(e) => {
                warn!("dropping line, not valid hex: {}", e);
                continue;
            }
        };
        if tx.send(InboundNotice { from: peer, notice }).await.is_err() {
            break;
        }
    }
}

use anyhow::Context;
use clap::Parser;
use minecraft_protocol_core::protocol::{codec, Decoder, ProtocolPhase};
use std::{io::Read, path::PathBuf};

/// Decodes server-bound packet frames and prints them.
#[derive(Debug, Parser)]
#[command(name = "packet-inspect", version)]
struct Args {
    /// Phase to decode the frames in: handshake, status, login or play.
    #[arg(short, long, default_value = "handshake")]
    phase: ProtocolPhase,
    /// Input is a stream of VarInt length-prefixed frames rather than a
    /// single frame.
    #[arg(short, long)]
    length_prefixed: bool,
    /// File to read. Reads standard input if omitted.
    input: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let bytes = match &args.input {
        Some(path) => fs_err::read(path)?,
        None => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .read_to_end(&mut bytes)
                .context("failed to read standard input")?;
            bytes
        }
    };
    tracing::debug!("Read {} bytes", bytes.len());

    if args.length_prefixed {
        let mut decoder = Decoder::new(&bytes);
        let mut index = 0;
        while !decoder.is_finished() {
            let frame = codec::read_frame(&mut decoder)
                .with_context(|| format!("failed to read frame {index}"))?;
            let packet = codec::decode_frame(args.phase, frame)
                .with_context(|| format!("failed to decode frame {index}"))?;
            println!("[{index}] {packet:#?}");
            index += 1;
        }
    } else {
        let packet = codec::decode_frame(args.phase, &bytes)?;
        println!("{packet:#?}");
    }

    Ok(())
}

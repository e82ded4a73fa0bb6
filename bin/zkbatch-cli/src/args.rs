//! Command line arguments for the `zkbatch-cli` binary.

use std::path::PathBuf;

use argh::FromArgs;

/// Offline tooling for zkbatch proofs and event streams.
#[derive(FromArgs)]
pub(crate) struct Args {
    #[argh(option, description = "path to a rollup config file", short = 'c')]
    pub(crate) config: Option<PathBuf>,

    #[argh(switch, description = "emit logs as JSON")]
    pub(crate) json_logs: bool,

    #[argh(subcommand)]
    pub(crate) subc: Subcommand,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
pub(crate) enum Subcommand {
    DecodeProof(SubcDecodeProof),
    EncodeProof(SubcEncodeProof),
    PublicInputs(SubcPublicInputs),
    Replay(SubcReplay),
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "decode-proof",
    description = "decodes a 256-byte raw proof into calldata JSON"
)]
pub(crate) struct SubcDecodeProof {
    #[argh(positional, description = "hex-encoded proof bytes, 0x prefix optional")]
    pub(crate) proof: String,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "encode-proof",
    description = "encodes calldata JSON into the 256-byte raw proof layout"
)]
pub(crate) struct SubcEncodeProof {
    #[argh(positional, description = "path to a calldata JSON file")]
    pub(crate) path: PathBuf,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "public-inputs",
    description = "prints the ordered public-input vector for a batch"
)]
pub(crate) struct SubcPublicInputs {
    #[argh(
        positional,
        description = "path to a JSON file with message_hashes, public_keys_x and public_keys_y"
    )]
    pub(crate) path: PathBuf,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "replay",
    description = "rebuilds batch history from an event stream"
)]
pub(crate) struct SubcReplay {
    #[argh(positional, description = "path to a JSON array of sequenced events")]
    pub(crate) path: PathBuf,

    #[argh(
        option,
        description = "genesis state root (default from config, else zero)",
        short = 'g'
    )]
    pub(crate) genesis_root: Option<String>,
}

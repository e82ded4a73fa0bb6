use std::{fs, path::Path};

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use zkbatch_config::RollupConfig;
use zkbatch_ledger::{Batch, BatchId, L2State, SubmissionId};
use zkbatch_primitives::{FieldElement, StateRoot, VerifierId};
use zkbatch_proof::{build_public_inputs, decode, encode, CalldataProof};
use zkbatch_rollup::{HistoryIndex, SequencedEvent};

use crate::args::{SubcDecodeProof, SubcEncodeProof, SubcPublicInputs, SubcReplay, Subcommand};

/// Parallel per-signature columns of a batch.
#[derive(Debug, Deserialize)]
struct BatchColumns {
    message_hashes: Vec<FieldElement>,
    public_keys_x: Vec<FieldElement>,
    public_keys_y: Vec<FieldElement>,
}

#[derive(Debug, Serialize)]
struct BatchEntry {
    batch_id: BatchId,
    #[serde(flatten)]
    batch: Batch,
    submissions: Vec<SubmissionId>,
}

#[derive(Debug, Serialize)]
struct ReplaySummary {
    state: L2State,
    verifier: Option<VerifierId>,
    batches: Vec<BatchEntry>,
    pending_submissions: Vec<SubmissionId>,
}

/// Runs a subcommand and returns what should be printed.
pub(crate) fn exec_subc(subc: Subcommand, config: Option<&RollupConfig>) -> anyhow::Result<String> {
    match subc {
        Subcommand::DecodeProof(args) => exec_decode_proof(args),
        Subcommand::EncodeProof(args) => exec_encode_proof(args),
        Subcommand::PublicInputs(args) => exec_public_inputs(args),
        Subcommand::Replay(args) => exec_replay(args, config),
    }
}

fn exec_decode_proof(args: SubcDecodeProof) -> anyhow::Result<String> {
    let raw = args.proof.trim();
    let bytes = hex::decode(raw.strip_prefix("0x").unwrap_or(raw)).context("invalid proof hex")?;
    let proof = decode(&bytes)?;
    debug!(len = bytes.len(), "decoded raw proof");
    Ok(serde_json::to_string_pretty(&CalldataProof::from_proof(&proof))?)
}

fn exec_encode_proof(args: SubcEncodeProof) -> anyhow::Result<String> {
    let calldata: CalldataProof = read_json(&args.path)?;
    let proof = calldata.parse()?;
    Ok(format!("0x{}", hex::encode(encode(&proof))))
}

fn exec_public_inputs(args: SubcPublicInputs) -> anyhow::Result<String> {
    let cols: BatchColumns = read_json(&args.path)?;
    let n = cols.message_hashes.len();
    if cols.public_keys_x.len() != n || cols.public_keys_y.len() != n {
        bail!(
            "column lengths differ: {n} hashes, {} x-coords, {} y-coords",
            cols.public_keys_x.len(),
            cols.public_keys_y.len()
        );
    }

    let inputs = build_public_inputs(&cols.message_hashes, &cols.public_keys_x, &cols.public_keys_y);
    Ok(serde_json::to_string_pretty(&inputs)?)
}

fn exec_replay(args: SubcReplay, config: Option<&RollupConfig>) -> anyhow::Result<String> {
    let genesis_root = match (&args.genesis_root, config) {
        (Some(root), _) => root.parse::<StateRoot>().context("invalid genesis root")?,
        (None, Some(config)) => config.ledger.genesis_state_root,
        (None, None) => StateRoot::zero(),
    };

    let events: Vec<SequencedEvent> = read_json(&args.path)?;
    let index = HistoryIndex::replay(genesis_root, &events)?;
    let ledger = index.ledger();

    let batches = (0..ledger.batch_count())
        .filter_map(|id| {
            ledger.batch(id).map(|batch| BatchEntry {
                batch_id: id,
                batch: *batch,
                submissions: ledger.batch_submissions(id).to_vec(),
            })
        })
        .collect();
    let pending_submissions = (0..ledger.submission_count())
        .filter(|id| !ledger.is_submission_included(*id))
        .collect();

    info!(events = events.len(), "replay complete");
    Ok(serde_json::to_string_pretty(&ReplaySummary {
        state: ledger.l2_state(),
        verifier: index.verifier(),
        batches,
        pending_submissions,
    })?)
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> anyhow::Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::{io::Write, path::PathBuf};

    use serde_json::{json, Value};
    use tempfile::NamedTempFile;
    use zkbatch_proof::StructuredProof;

    use super::*;

    fn json_file(value: &Value) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{value}").unwrap();
        file
    }

    fn words() -> StructuredProof {
        let mut w = [FieldElement::zero(); 8];
        for (i, x) in w.iter_mut().enumerate() {
            *x = FieldElement::from_u64(i as u64 + 1);
        }
        StructuredProof::from_words(w)
    }

    #[test]
    fn test_decode_then_encode_proof() {
        let hex_proof = format!("0x{}", hex::encode(encode(&words())));
        let out = exec_decode_proof(SubcDecodeProof { proof: hex_proof.clone() }).unwrap();

        let file = json_file(&serde_json::from_str(&out).unwrap());
        let back = exec_encode_proof(SubcEncodeProof {
            path: file.path().to_owned(),
        })
        .unwrap();
        assert_eq!(back, hex_proof);
    }

    #[test]
    fn test_decode_short_proof_fails() {
        let res = exec_decode_proof(SubcDecodeProof {
            proof: "0x0102".into(),
        });
        assert!(res.is_err());
    }

    #[test]
    fn test_public_inputs_order() {
        let fe = |v: u64| FieldElement::from_u64(v).to_string();
        let file = json_file(&json!({
            "message_hashes": [fe(1), fe(4)],
            "public_keys_x": [fe(2), fe(5)],
            "public_keys_y": [fe(3), fe(6)],
        }));

        let out = exec_public_inputs(SubcPublicInputs {
            path: file.path().to_owned(),
        })
        .unwrap();
        let inputs: Vec<FieldElement> = serde_json::from_str(&out).unwrap();
        assert_eq!(inputs, (1..=6).map(FieldElement::from_u64).collect::<Vec<_>>());
    }

    #[test]
    fn test_public_inputs_rejects_ragged_columns() {
        let fe = FieldElement::from_u64(1).to_string();
        let file = json_file(&json!({
            "message_hashes": [fe, fe],
            "public_keys_x": [fe, fe],
            "public_keys_y": [fe],
        }));
        let res = exec_public_inputs(SubcPublicInputs {
            path: file.path().to_owned(),
        });
        assert!(res.is_err());
    }

    #[test]
    fn test_replay_empty_stream() {
        let file = json_file(&json!([]));
        let out = exec_replay(
            SubcReplay {
                path: file.path().to_owned(),
                genesis_root: None,
            },
            None,
        )
        .unwrap();
        let summary: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(summary["state"]["block_number"], 0);
        assert_eq!(summary["batches"], json!([]));
    }

    #[test]
    fn test_missing_file() {
        let res = exec_public_inputs(SubcPublicInputs {
            path: PathBuf::from("/nonexistent/batch.json"),
        });
        assert!(res.is_err());
    }
}

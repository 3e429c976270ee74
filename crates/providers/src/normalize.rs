//! Normalization of raw tool configuration into the canonical compiler
//! payload.
//!
//! Pure mapping, no I/O. A configuration whose compiler substructure is
//! absent normalizes to `None` — "nothing to submit" — which callers must
//! treat as ordinary control flow, not a failure.

use contrail_types::{
    BuidlerSolc, ConfigPayload, HardhatSolidity, LegacySolcSettings, OpenZeppelinCompiler, Optimizer, ProviderConfig,
    SolcSettings, TruffleCompilers,
};

/// Map a raw provider configuration to the canonical payload, if the
/// configuration carries enough to build one.
pub fn normalize(config: &ProviderConfig) -> Option<ConfigPayload> {
    match config {
        ProviderConfig::NewTruffle { compilers } => compilers.as_ref().and_then(from_truffle_compilers),
        // Legacy shape wins when present; some old projects already carry
        // the new-style block alongside it.
        ProviderConfig::OldTruffle { solc, compilers } => match solc {
            Some(solc) => Some(from_legacy_solc(solc)),
            None => compilers.as_ref().and_then(from_truffle_compilers),
        },
        ProviderConfig::OpenZeppelin { compiler } => compiler.as_ref().map(from_openzeppelin_compiler),
        ProviderConfig::Buidler { solc } => solc.as_ref().map(from_buidler_solc),
        ProviderConfig::Hardhat { solidity } => solidity.as_ref().and_then(from_hardhat_solidity),
    }
}

fn optimizer_fields(optimizer: Option<&Optimizer>) -> (Option<bool>, Option<u32>) {
    match optimizer {
        Some(optimizer) => (optimizer.enabled, optimizer.runs),
        None => (None, None),
    }
}

fn settings_fields(settings: Option<&SolcSettings>) -> (Option<bool>, Option<u32>, Option<String>) {
    match settings {
        Some(settings) => {
            let (used, count) = optimizer_fields(settings.optimizer.as_ref());
            (used, count, settings.evm_version.clone())
        }
        None => (None, None, None),
    }
}

fn from_truffle_compilers(compilers: &TruffleCompilers) -> Option<ConfigPayload> {
    let solc = compilers.solc.as_ref()?;
    let (optimizations_used, optimizations_count, evm_version) = settings_fields(solc.settings.as_ref());
    Some(ConfigPayload {
        solc_version: solc.version.clone(),
        optimizations_used,
        optimizations_count,
        evm_version,
    })
}

fn from_legacy_solc(solc: &LegacySolcSettings) -> ConfigPayload {
    let (optimizations_used, optimizations_count) = optimizer_fields(solc.optimizer.as_ref());
    ConfigPayload {
        solc_version: solc.version.clone(),
        optimizations_used,
        optimizations_count,
        evm_version: None,
    }
}

fn from_openzeppelin_compiler(compiler: &OpenZeppelinCompiler) -> ConfigPayload {
    let (optimizations_used, optimizations_count) = optimizer_fields(compiler.optimizer.as_ref());
    ConfigPayload {
        solc_version: compiler.solc_version.clone(),
        optimizations_used,
        optimizations_count,
        evm_version: compiler.evm_version.clone(),
    }
}

fn from_buidler_solc(solc: &BuidlerSolc) -> ConfigPayload {
    let (optimizations_used, optimizations_count) = optimizer_fields(solc.optimizer.as_ref());
    ConfigPayload {
        solc_version: solc.version.clone(),
        optimizations_used,
        optimizations_count,
        evm_version: solc.evm_version.clone(),
    }
}

/// Hardhat allows several compiler entries; the first one drives the
/// canonical payload.
fn from_hardhat_solidity(solidity: &HardhatSolidity) -> Option<ConfigPayload> {
    let compiler = solidity.compilers.first()?;
    let (optimizations_used, optimizations_count, evm_version) = settings_fields(compiler.settings.as_ref());
    Some(ConfigPayload {
        solc_version: compiler.version.clone(),
        optimizations_used,
        optimizations_count,
        evm_version,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use contrail_types::{HardhatCompiler, TruffleSolc};

    #[test]
    fn new_truffle_compiler_fields_map_directly() {
        let config = ProviderConfig::NewTruffle {
            compilers: Some(TruffleCompilers {
                solc: Some(TruffleSolc {
                    version: Some("0.8.1".into()),
                    settings: Some(SolcSettings {
                        optimizer: Some(Optimizer {
                            enabled: Some(true),
                            runs: Some(200),
                        }),
                        evm_version: Some("istanbul".into()),
                    }),
                }),
            }),
        };

        let payload = normalize(&config).unwrap();
        assert_eq!(payload.solc_version.as_deref(), Some("0.8.1"));
        assert_eq!(payload.optimizations_used, Some(true));
        assert_eq!(payload.optimizations_count, Some(200));
        assert_eq!(payload.evm_version.as_deref(), Some("istanbul"));
    }

    #[test]
    fn old_truffle_prefers_the_legacy_solc_block() {
        let config = ProviderConfig::OldTruffle {
            solc: Some(LegacySolcSettings {
                version: Some("0.4.24".into()),
                optimizer: Some(Optimizer {
                    enabled: Some(false),
                    runs: None,
                }),
            }),
            compilers: Some(TruffleCompilers {
                solc: Some(TruffleSolc {
                    version: Some("0.8.0".into()),
                    settings: None,
                }),
            }),
        };

        let payload = normalize(&config).unwrap();
        assert_eq!(payload.solc_version.as_deref(), Some("0.4.24"));
        assert_eq!(payload.optimizations_used, Some(false));
        assert_eq!(payload.evm_version, None);
    }

    #[test]
    fn old_truffle_falls_back_to_the_new_style_block() {
        let config = ProviderConfig::OldTruffle {
            solc: None,
            compilers: Some(TruffleCompilers {
                solc: Some(TruffleSolc {
                    version: Some("0.5.16".into()),
                    settings: None,
                }),
            }),
        };

        let payload = normalize(&config).unwrap();
        assert_eq!(payload.solc_version.as_deref(), Some("0.5.16"));
    }

    #[test]
    fn openzeppelin_maps_its_flat_compiler_block() {
        let config = ProviderConfig::OpenZeppelin {
            compiler: Some(OpenZeppelinCompiler {
                solc_version: Some("0.5.9".into()),
                optimizer: Some(Optimizer {
                    enabled: Some(true),
                    runs: Some(50),
                }),
                evm_version: None,
            }),
        };

        let payload = normalize(&config).unwrap();
        assert_eq!(payload.solc_version.as_deref(), Some("0.5.9"));
        assert_eq!(payload.optimizations_count, Some(50));
    }

    #[test]
    fn buidler_maps_its_solc_block() {
        let config = ProviderConfig::Buidler {
            solc: Some(BuidlerSolc {
                version: Some("0.5.15".into()),
                optimizer: None,
                evm_version: Some("petersburg".into()),
            }),
        };

        let payload = normalize(&config).unwrap();
        assert_eq!(payload.solc_version.as_deref(), Some("0.5.15"));
        assert_eq!(payload.optimizations_used, None);
        assert_eq!(payload.evm_version.as_deref(), Some("petersburg"));
    }

    #[test]
    fn hardhat_takes_the_first_compiler_entry() {
        let config = ProviderConfig::Hardhat {
            solidity: Some(HardhatSolidity {
                compilers: vec![
                    HardhatCompiler {
                        version: Some("0.8.20".into()),
                        settings: Some(SolcSettings {
                            optimizer: Some(Optimizer {
                                enabled: Some(true),
                                runs: Some(1000),
                            }),
                            evm_version: None,
                        }),
                    },
                    HardhatCompiler {
                        version: Some("0.6.12".into()),
                        settings: None,
                    },
                ],
            }),
        };

        let payload = normalize(&config).unwrap();
        assert_eq!(payload.solc_version.as_deref(), Some("0.8.20"));
        assert_eq!(payload.optimizations_count, Some(1000));
    }

    #[test]
    fn absent_substructures_normalize_to_nothing() {
        assert_eq!(normalize(&ProviderConfig::NewTruffle { compilers: None }), None);
        assert_eq!(
            normalize(&ProviderConfig::OldTruffle {
                solc: None,
                compilers: None
            }),
            None
        );
        assert_eq!(normalize(&ProviderConfig::OpenZeppelin { compiler: None }), None);
        assert_eq!(normalize(&ProviderConfig::Buidler { solc: None }), None);
        assert_eq!(normalize(&ProviderConfig::Hardhat { solidity: None }), None);
        // An empty compiler list is as good as no block at all.
        assert_eq!(
            normalize(&ProviderConfig::Hardhat {
                solidity: Some(HardhatSolidity { compilers: vec![] })
            }),
            None
        );
    }

    #[test]
    fn compilers_block_without_solc_entry_is_incomplete() {
        let config = ProviderConfig::NewTruffle {
            compilers: Some(TruffleCompilers { solc: None }),
        };
        assert_eq!(normalize(&config), None);
    }
}

use crate::error::SettingsError;
use crate::settings::RegistrySettings;
use discount_core::{
    CodeRegistry, CodeSet, DiscountCode, Redemption, RegistryError, SnapshotStore, StorageError,
};
use discount_generator::{codespace_size, Generator};
use parking_lot::RwLock;
use std::collections::HashSet;
use tracing::{debug, info, trace, warn};

/// A concrete implementation of the `CodeRegistry` trait.
///
/// This service wraps a `SnapshotStore` and a `Generator` behind one
/// reader/writer lock:
/// - `exists` and `count` take the shared lock
/// - `generate_batch` and `use_code` take the exclusive lock and keep it
///   until the snapshot write has returned
///
/// Persistence latency is therefore part of every write's critical section,
/// and a snapshot always reflects a state that readers could observe.
///
/// Known weak points:
/// - a failed snapshot write is logged and not retried, so storage can lag
///   behind memory until the next successful write
/// - lock acquisition has no timeout; a batch that nearly fills the codespace
///   for its length can keep every other caller waiting for a long time
/// - redeemed codes are forgotten, so a later batch may mint the same string
///   again
#[derive(Debug)]
pub struct RegistryService<S, G> {
    settings: RegistrySettings,
    codes: RwLock<CodeSet>,
    store: S,
    generator: G,
}

impl<S: SnapshotStore, G: Generator> RegistryService<S, G> {
    /// Opens a registry, seeding it from the store's last snapshot.
    ///
    /// A missing or unreadable snapshot is logged and the registry starts
    /// empty; only invalid settings are rejected.
    pub fn open(settings: RegistrySettings, store: S, generator: G) -> Result<Self, SettingsError> {
        settings.validate()?;

        let codes = match store.load() {
            Ok(codes) => {
                info!(codes = codes.len(), "loaded code snapshot");
                codes
            }
            Err(StorageError::NotFound(location)) => {
                info!(%location, "no code snapshot found, starting empty");
                CodeSet::new()
            }
            Err(err) => {
                warn!(error = %err, "failed to load code snapshot, starting empty");
                CodeSet::new()
            }
        };

        Ok(Self {
            settings,
            codes: RwLock::new(codes),
            store,
            generator,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns a copy of the outstanding codes.
    pub fn codes(&self) -> CodeSet {
        self.codes.read().clone()
    }

    fn validate_request(&self, count: u16, length: u8) -> Result<(), RegistryError> {
        if count > self.settings.max_codes_per_request {
            return Err(RegistryError::CountExceeded {
                requested: count,
                max: self.settings.max_codes_per_request,
            });
        }

        if !self.settings.length_range().contains(&length) {
            return Err(RegistryError::LengthOutOfRange {
                length,
                min: self.settings.min_code_length,
                max: self.settings.max_code_length,
            });
        }

        Ok(())
    }

    /// Writes the snapshot. Must be called with the write lock held.
    fn persist(&self, codes: &CodeSet) {
        if let Err(err) = self.store.save(codes) {
            warn!(
                error = %err,
                codes = codes.len(),
                "failed to persist code snapshot, storage is behind memory"
            );
        }
    }
}

/// Fails when fewer than `count` unused strings of `length` remain, since the
/// generation loop would otherwise never finish.
fn ensure_room(codes: &CodeSet, count: u16, length: u8) -> Result<(), RegistryError> {
    let Some(size) = codespace_size(length) else {
        return Ok(());
    };

    let requested = u64::from(count);
    if size >= codes.len() as u64 + requested {
        return Ok(());
    }

    let available = size.saturating_sub(codes.count_with_length(usize::from(length)) as u64);
    if requested > available {
        return Err(RegistryError::CodespaceExhausted {
            length,
            requested: count,
            available,
        });
    }

    Ok(())
}

impl<S: SnapshotStore, G: Generator> CodeRegistry for RegistryService<S, G> {
    fn generate_batch(&self, count: u16, length: u8) -> Result<Vec<DiscountCode>, RegistryError> {
        self.validate_request(count, length)?;

        if count == 0 {
            return Ok(Vec::new());
        }

        let mut codes = self.codes.write();
        ensure_room(&codes, count, length)?;

        // Collected separately and merged at the end, so a generator failure
        // leaves the set exactly as it was.
        let mut batch: HashSet<DiscountCode> = HashSet::with_capacity(usize::from(count));
        let mut discarded: u64 = 0;

        while batch.len() < usize::from(count) {
            let candidate: DiscountCode = self
                .generator
                .generate(length)
                .map_err(|err| {
                    warn!(error = %err, count, length, "code generator failed, batch abandoned");
                    RegistryError::Generator(err.to_string())
                })?
                .into();

            if codes.contains(candidate.as_str()) || !batch.insert(candidate) {
                discarded += 1;
            }
        }

        let batch: Vec<DiscountCode> = batch.into_iter().collect();
        codes.extend(batch.iter().cloned());
        self.persist(&codes);

        info!(count, length, discarded, total = codes.len(), "generated code batch");
        Ok(batch)
    }

    fn use_code(&self, code: &str) -> Redemption {
        let mut codes = self.codes.write();

        if !codes.remove(code) {
            debug!(code, "redemption of unknown code");
            return Redemption::NotFound;
        }

        self.persist(&codes);
        debug!(code, remaining = codes.len(), "redeemed code");
        Redemption::Redeemed
    }

    fn exists(&self, code: &str) -> bool {
        let exists = self.codes.read().contains(code);
        trace!(code, exists, "checked code");
        exists
    }

    fn count(&self) -> usize {
        self.codes.read().len()
    }
}

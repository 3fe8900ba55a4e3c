use dotenv::dotenv;
use std::env;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;
use toml::Value;

const KEY_LEN: usize = 32;
const IV_LEN: usize = 16;

fn invalid(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}

/// Generated source for `$OUT_DIR/app_metadata.rs`.
#[derive(Default)]
struct MetadataSource {
    body: String,
}

impl MetadataSource {
    fn text(&mut self, key: &str, value: &str) {
        let _ = writeln!(
            self.body,
            "#[allow(unused)]\npub const APP_METADATA_{}: &str = {:?};",
            key.to_uppercase(),
            value
        );
    }

    fn bytes(&mut self, key: &str, value: &[u8]) {
        let _ = writeln!(
            self.body,
            "#[allow(unused)]\npub const APP_METADATA_{}: &[u8; {}] = &{:?};",
            key.to_uppercase(),
            value.len(),
            value
        );
    }

    fn save(&self) -> io::Result<()> {
        let out_dir = env::var("OUT_DIR").map_err(|e| io::Error::new(io::ErrorKind::NotFound, e))?;
        fs::write(Path::new(&out_dir).join("app_metadata.rs"), &self.body)
    }
}

/// String entries of `[package.metadata]`.
fn package_metadata() -> io::Result<Vec<(String, String)>> {
    let manifest: Value = toml::from_str(&fs::read_to_string("Cargo.toml")?).map_err(|e| invalid(e.to_string()))?;
    let entries = manifest
        .get("package")
        .and_then(|package| package.get("metadata"))
        .and_then(Value::as_table)
        .map(|table| {
            table
                .iter()
                .filter_map(|(key, value)| value.as_str().map(|v| (key.clone(), v.to_string())))
                .collect()
        })
        .unwrap_or_default();
    Ok(entries)
}

/// Right-pads with `!` or truncates to exactly `len` bytes.
fn fit(seed: String, len: usize) -> Vec<u8> {
    let mut bytes = seed.into_bytes();
    bytes.resize(len, b'!');
    bytes
}

/// Key and IV for the token cache, from the environment or derived from the
/// package name for local builds.
fn cache_cipher() -> io::Result<(Vec<u8>, Vec<u8>)> {
    match (env::var("ENCRYPTION_KEY"), env::var("ENCRYPTION_IV")) {
        (Ok(key), Ok(iv)) => {
            if key.len() != KEY_LEN {
                return Err(invalid(format!("ENCRYPTION_KEY must be {} bytes, got {}", KEY_LEN, key.len())));
            }
            if iv.len() != IV_LEN {
                return Err(invalid(format!("ENCRYPTION_IV must be {} bytes, got {}", IV_LEN, iv.len())));
            }
            Ok((key.into_bytes(), iv.into_bytes()))
        }
        _ => {
            let name = env!("CARGO_PKG_NAME");
            println!("cargo:warning=ENCRYPTION_KEY/ENCRYPTION_IV not set, the token cache uses a built-in key.");
            println!("cargo:warning=Set both in the environment or a .env file for release builds.");
            Ok((fit(format!("{}_token_cache_key", name), KEY_LEN), fit(format!("{}_cache_iv", name), IV_LEN)))
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenv();

    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-changed=.env");
    println!("cargo:rerun-if-env-changed=ENCRYPTION_KEY");
    println!("cargo:rerun-if-env-changed=ENCRYPTION_IV");

    let mut source = MetadataSource::default();
    source.text("NAME", env!("CARGO_PKG_NAME"));
    source.text("VERSION", env!("CARGO_PKG_VERSION"));
    for (key, value) in package_metadata()? {
        source.text(&key, &value);
    }

    let (key, iv) = cache_cipher()?;
    source.bytes("ENCRYPTION_KEY", &key);
    source.bytes("ENCRYPTION_IV", &iv);

    source.save()
}

//! Fetches a prebuilt PDFium into `vendor/pdfium` for the `pdf-viewer` feature.
//!
//! A failed download is only a warning: the viewer then falls back to a
//! system-wide PDFium at runtime.

use std::env;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

const PDFIUM_RELEASE: &str = "chromium/7543";

struct PdfiumTarget {
    platform: &'static str,
    arch: &'static str,
    lib_name: &'static str,
}

impl PdfiumTarget {
    fn detect(target: &str) -> Option<Self> {
        let arm = target.contains("aarch64");
        if target.contains("apple") {
            Some(Self {
                platform: "mac",
                arch: if arm { "arm64" } else { "x64" },
                lib_name: "libpdfium.dylib",
            })
        } else if target.contains("linux") {
            Some(Self {
                platform: "linux",
                arch: if arm { "arm64" } else { "x64" },
                lib_name: "libpdfium.so",
            })
        } else if target.contains("windows") {
            let arch = if arm {
                "arm64"
            } else if target.contains("i686") {
                "x86"
            } else {
                "x64"
            };
            Some(Self {
                platform: "win",
                arch,
                lib_name: "pdfium.dll",
            })
        } else {
            None
        }
    }

    fn download_url(&self) -> String {
        format!(
            "https://github.com/bblanchon/pdfium-binaries/releases/download/{}/pdfium-{}-{}.tgz",
            PDFIUM_RELEASE, self.platform, self.arch
        )
    }
}

fn main() {
    println!("cargo:rerun-if-env-changed=MAKTABA_SKIP_PDFIUM_DOWNLOAD");

    if env::var("CARGO_FEATURE_PDF_VIEWER").is_err() {
        return;
    }
    if env::var("MAKTABA_SKIP_PDFIUM_DOWNLOAD").is_ok() {
        println!("cargo:warning=Skipping PDFium download, the system library will be used");
        return;
    }

    if let Err(e) = install_pdfium() {
        println!("cargo:warning=PDFium not installed ({}), the system library will be used", e);
    }
}

fn install_pdfium() -> Result<(), Box<dyn Error>> {
    let target_triple = env::var("TARGET")?;
    let Some(target) = PdfiumTarget::detect(&target_triple) else {
        return Err(format!("unsupported target {}", target_triple).into());
    };

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let workspace_root = manifest_dir
        .parent()
        .and_then(Path::parent)
        .ok_or("workspace root not found")?;
    let pdfium_dir = workspace_root.join("vendor").join("pdfium");
    let lib_dir = pdfium_dir.join("lib");
    let lib_path = lib_dir.join(target.lib_name);

    if !lib_path.exists() {
        let url = target.download_url();
        println!("cargo:warning=Downloading PDFium from {}", url);

        fs::create_dir_all(&lib_dir)?;
        let archive = env::temp_dir().join("maktaba-pdfium.tgz");
        download(&url, &archive)?;
        let unpacked = unpack(&archive, &pdfium_dir);
        let _ = fs::remove_file(&archive);
        unpacked?;

        if !lib_path.exists() {
            return Err(format!("{} missing after extraction", lib_path.display()).into());
        }
        if target.platform == "mac" {
            set_install_name(&lib_path);
        }
    }

    println!("cargo:rustc-link-search=native={}", lib_dir.display());
    println!("cargo:rustc-link-lib=dylib=pdfium");
    if target.platform != "win" {
        println!("cargo:rustc-link-arg=-Wl,-rpath,{}", lib_dir.display());
    }
    println!("cargo:rerun-if-changed={}", lib_dir.display());
    Ok(())
}

fn download(url: &str, dest: &Path) -> Result<(), Box<dyn Error>> {
    let response = ureq::get(url).call()?;
    let mut file = fs::File::create(dest)?;
    std::io::copy(&mut response.into_reader(), &mut file)?;
    Ok(())
}

fn unpack(archive: &Path, dest: &Path) -> Result<(), Box<dyn Error>> {
    let file = fs::File::open(archive)?;
    let mut tarball = tar::Archive::new(flate2::read::GzDecoder::new(file));
    tarball.unpack(dest)?;
    Ok(())
}

/// macOS loads the library through @rpath
fn set_install_name(lib_path: &Path) {
    let status = std::process::Command::new("install_name_tool")
        .arg("-id")
        .arg("@rpath/libpdfium.dylib")
        .arg(lib_path)
        .status();

    match status {
        Ok(status) if status.success() => {}
        Ok(status) => println!("cargo:warning=install_name_tool exited with {}", status),
        Err(e) => println!("cargo:warning=install_name_tool not available: {}", e),
    }
}

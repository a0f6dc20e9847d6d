use std::path::Path;
use std::{env, fs};

use const_gen::*;
use serde::Deserialize;

/// Optional build-time configuration, read from the file named by `JOYSTICK_TOML_PATH`
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct JoystickTomlConfig {
    storage: Option<StorageTomlConfig>,
    firmware: Option<FirmwareTomlConfig>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct StorageTomlConfig {
    /// What a never-written cell reads as, 0xFF for most EEPROMs and NOR flashes
    erased_value: Option<u8>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FirmwareTomlConfig {
    major: Option<u8>,
    minor: Option<u8>,
}

fn main() {
    // Ensure build.rs is re-run when files change
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=JOYSTICK_TOML_PATH");

    // Read joystick.toml if it's present
    let user_config_str = if let Ok(toml_path) = env::var("JOYSTICK_TOML_PATH") {
        println!("cargo:rerun-if-changed={toml_path}");
        fs::read_to_string(&toml_path).expect("Failed to read user config file")
    } else {
        "".to_string()
    };

    let user_toml: JoystickTomlConfig =
        toml::from_str(&user_config_str).expect("Failed to parse JOYSTICK_TOML_PATH file\n");

    let constants = get_constants_str(&user_toml);

    // Write to constants.rs file
    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("constants.rs");
    fs::write(&dest_path, constants).expect("Failed to write constants.rs file");
}

fn get_constants_str(config: &JoystickTomlConfig) -> String {
    let storage = config.storage.unwrap_or_default();
    let firmware = config.firmware.unwrap_or_default();

    let erased_value: u8 = storage.erased_value.unwrap_or(0xFF);
    // Unless overridden, the recorded firmware version follows the package version
    let firmware_major: u8 = firmware
        .major
        .unwrap_or_else(|| package_version_part("CARGO_PKG_VERSION_MAJOR"));
    let firmware_minor: u8 = firmware
        .minor
        .unwrap_or_else(|| package_version_part("CARGO_PKG_VERSION_MINOR"));

    let constant_strs = vec![
        const_declaration!(pub(crate) ERASED_VALUE = erased_value),
        const_declaration!(pub(crate) FIRMWARE_VERSION_MAJOR = firmware_major),
        const_declaration!(pub(crate) FIRMWARE_VERSION_MINOR = firmware_minor),
    ];

    constant_strs
        .into_iter()
        .map(|s| "#[allow(clippy::redundant_static_lifetimes)]\n".to_owned() + s.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

fn package_version_part(var: &str) -> u8 {
    let value = env::var(var).unwrap_or_else(|_| "0".to_string());
    value
        .parse()
        .unwrap_or_else(|_| panic!("{var}={value} does not fit in a single EEPROM byte"))
}

const DEFAULT_DATA_DIR: &str = "../assets";
const DATA_DIR_ENV: &str = "ASSETIO_DATA_DIR";

#[allow(clippy::unwrap_used)]
fn check_dirent_has_field(cfg_name: &str) {
    // Tell cargo about the cfg we intend to use so `check-cfg` won't warn.
    println!("cargo:rustc-check-cfg=cfg({cfg_name})");

    // No <dirent.h> to probe against on windows targets, the FindFirstFile backend is used there.
    if std::env::var("CARGO_CFG_TARGET_FAMILY").is_ok_and(|family| family.contains("windows")) {
        return;
    }

    let out = std::env::var("OUT_DIR").unwrap();
    let c_file = format!("check_{cfg_name}.c");
    let src = std::path::PathBuf::from(&out).join(&c_file);

    // This C source fails to compile if the struct field is not present.
    // We derive the field name from the `cfg_name`, which is of the form `has_<field>`.
    let field_name = cfg_name.strip_prefix("has_").unwrap_or(cfg_name).to_owned();
    assert!(
        field_name.starts_with("d_"),
        "Field name must start with d_"
    );

    let code = format!(
        "#include <dirent.h>\n#include <stddef.h>\nstatic const size_t off = offsetof(struct dirent, {field_name});\nint main(void) {{ (void)off; return 0; }}\n",
    );
    std::fs::write(&src, code).unwrap();

    let mut build = cc::Build::new();
    build.file(&src).cargo_warnings(false).cargo_output(true);

    if build.try_compile(&c_file).is_ok() {
        println!("cargo:rustc-cfg={cfg_name}")
    }
}

fn main() {
    // The asset root baked into the binary, overridable at build time.
    println!("cargo:rerun-if-env-changed={DATA_DIR_ENV}");
    let data_dir = std::env::var(DATA_DIR_ENV)
        .ok()
        .filter(|dir| !dir.is_empty())
        .unwrap_or_else(|| DEFAULT_DATA_DIR.to_owned());
    println!("cargo:rustc-env=ASSETIO_DEFAULT_DATA_DIR={data_dir}");

    check_dirent_has_field("has_d_type");
}

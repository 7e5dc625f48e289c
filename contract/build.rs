use std::{env, error::Error, fmt::Write as _, fs, path::PathBuf};

use sdp_generator::{Generator, GeneratorOptions};

const SCHEMAS: [&str; 2] = ["shapes", "collisions"];

fn main() -> Result<(), Box<dyn Error>> {
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let go_options = GeneratorOptions {
        package: "main".into(),
    };

    let mut modules = String::new();
    for name in SCHEMAS {
        let path = format!("schemas/{name}.sdp");
        println!("cargo:rerun-if-changed={path}");
        let schema = sdp_schema::load_schema(&path)?;

        let rust = out_dir.join(format!("{name}.rs"));
        fs::write(&rust, Generator::Rust.generate(&schema, &GeneratorOptions::default()))?;
        fs::write(
            out_dir.join(format!("{name}.go")),
            Generator::Go.generate(&schema, &go_options),
        )?;

        // include! cannot carry the inner attributes of a generated file, a module can
        writeln!(modules, "#[path = {:?}]\npub mod {name};", rust.display().to_string())?;
    }
    fs::write(out_dir.join("generated.rs"), modules)?;
    Ok(())
}

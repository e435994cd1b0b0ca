//! # SCIM Schema Validator
//!
//! Checks that SCIM schema documents build with this library and prints what
//! each one defines.
//!
//! Every `.json` file given (directly, or found in a given directory) is built
//! into a [`Schema`]. That validates every attribute definition (names,
//! characteristic values, `referenceTypes` and `subAttributes` rules, no nested
//! complex attributes) and the `meta` block.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin schema-validator schemas/User.json
//! cargo run --bin schema-validator schemas/ extra/Device.json
//! ```
//!
//! ## Output
//!
//! ```text
//! schemas/Group.json
//!   ✓ Group (urn:ietf:params:scim:schemas:core:2.0:Group)
//!     2 attributes, 0 required, 1 multi-valued
//!     complex: 1, string: 1
//!     members { value, $ref, type }
//!     members.$ref -> User, Group
//!
//! schemas/Schema.json
//!   ❌ Validation error: Nested complex attributes are not allowed: 'attributes.subattributes'
//!
//! 1 of 2 schema documents valid
//! ```
//!
//! The exit code is `0` when every document is valid and `1` otherwise.

use scim_schema::schema::{AttributeDefinition, ReferenceType, SubAttributeDefinition};
use scim_schema::{Schema, ScimResult};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    let program = env::args().next().unwrap_or_else(|| "schema-validator".to_string());
    let targets: Vec<PathBuf> = env::args().skip(1).map(PathBuf::from).collect();

    if targets.is_empty() {
        eprintln!("Usage: {} <schema-file-or-directory>...", program);
        return ExitCode::FAILURE;
    }

    let files = match collect_files(&targets) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let valid = files.iter().filter(|file| check(file)).count();
    println!("{} of {} schema documents valid", valid, files.len());

    if valid == files.len() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Expands directories into their `.json` files, in name order.
fn collect_files(targets: &[PathBuf]) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for target in targets {
        if target.is_dir() {
            let mut found: Vec<PathBuf> = fs::read_dir(target)?
                .filter_map(Result::ok)
                .map(|entry| entry.path())
                .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
                .collect();
            found.sort();
            files.extend(found);
        } else if target.is_file() {
            files.push(target.clone());
        } else {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("'{}' is not a file or directory", target.display()),
            ));
        }
    }
    Ok(files)
}

fn check(path: &Path) -> bool {
    println!("{}", path.display());
    let result: ScimResult<Schema> = Schema::from_file(path);
    let valid = match result {
        Ok(schema) => {
            describe(&schema);
            true
        }
        Err(e) => {
            println!("  ❌ {}", e);
            false
        }
    };
    println!();
    valid
}

fn describe(schema: &Schema) {
    println!("  ✓ {} ({})", schema.name().unwrap_or("<unnamed>"), schema.id());

    let definitions: Vec<&AttributeDefinition> =
        schema.attributes().iter().map(|attribute| attribute.definition()).collect();
    let required = definitions.iter().filter(|definition| definition.required()).count();
    let multi_valued = definitions.iter().filter(|definition| definition.multi_valued()).count();
    println!(
        "    {} attributes, {} required, {} multi-valued",
        definitions.len(),
        required,
        multi_valued
    );

    let mut by_type: BTreeMap<&str, usize> = BTreeMap::new();
    for definition in &definitions {
        *by_type.entry(definition.data_type().as_str()).or_default() += 1;
    }
    let types: Vec<String> = by_type
        .iter()
        .map(|(data_type, count)| format!("{}: {}", data_type, count))
        .collect();
    println!("    {}", types.join(", "));

    for definition in &definitions {
        match definition {
            AttributeDefinition::Complex(complex) => {
                let names: Vec<&str> = complex.sub_attributes.iter().map(|sub| sub.name()).collect();
                println!("    {} {{ {} }}", definition.name(), names.join(", "));
                for sub in &complex.sub_attributes {
                    if let SubAttributeDefinition::Reference(reference) = sub {
                        print_reference_types(
                            &format!("{}.{}", definition.name(), sub.name()),
                            &reference.reference_types,
                        );
                    }
                }
            }
            AttributeDefinition::Reference(reference) => {
                print_reference_types(definition.name(), &reference.reference_types);
            }
            AttributeDefinition::Simple(_) => {}
        }
    }
}

fn print_reference_types(path: &str, reference_types: &[ReferenceType]) {
    let types: Vec<String> = reference_types.iter().map(ToString::to_string).collect();
    println!("    {} -> {}", path, types.join(", "));
}

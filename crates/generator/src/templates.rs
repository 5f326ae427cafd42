//! Template loading and management

use rpcgen_common::{pascal_case, GeneratorError};
use std::collections::HashMap;
use std::error::Error as _;
use std::fs;
use std::path::{Path, PathBuf};
use tera::{Tera, Value};
use tracing::debug;

/// Subdirectory of the template home holding the rpc templates
pub const TEMPLATE_DIR: &str = "rpc";

/// Extension of user-supplied template files
pub const TEMPLATE_EXT: &str = "tpl";

/// Template names with their embedded defaults
pub const TEMPLATES: [(&str, &str); 5] = [
    ("main", include_str!("../templates/main.go.tera")),
    ("config", include_str!("../templates/config.go.tera")),
    ("svc", include_str!("../templates/svc.go.tera")),
    ("etc", include_str!("../templates/etc.yaml.tera")),
    ("client", include_str!("../templates/client.go.tera")),
];

/// `~/.rpcgen`
pub fn default_template_home() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".rpcgen"))
}

/// Where a template named `name` lives under `home`
pub fn template_path(home: &Path, name: &str) -> PathBuf {
    home.join(TEMPLATE_DIR)
        .join(format!("{}.{}", name, TEMPLATE_EXT))
}

/// Load all templates
///
/// A `<home>/rpc/<name>.tpl` file replaces the embedded default of the same
/// name; templates missing from the home fall back to the defaults.
pub fn load_templates(home: Option<&Path>) -> Result<Tera, GeneratorError> {
    let mut tera = Tera::default();

    tera.register_filter("pascal", pascal_filter);

    for (name, default) in TEMPLATES {
        let custom = home
            .map(|home| template_path(home, name))
            .filter(|path| path.is_file());

        let source = match custom {
            Some(path) => {
                debug!(template = name, path = %path.display(), "using custom template");
                fs::read_to_string(&path)?
            }
            None => default.to_string(),
        };

        tera.add_raw_template(name, &source).map_err(|e| {
            GeneratorError::Template(format!("Failed to load {} template: {}", name, describe(&e)))
        })?;
    }

    Ok(tera)
}

/// Write the embedded templates to `<home>/rpc` so they can be customized
///
/// Existing files are left untouched. Returns the files that were written.
pub fn write_default_templates(home: &Path) -> Result<Vec<PathBuf>, GeneratorError> {
    fs::create_dir_all(home.join(TEMPLATE_DIR))?;

    let mut written = Vec::new();
    for (name, default) in TEMPLATES {
        let path = template_path(home, name);
        if path.exists() {
            continue;
        }
        fs::write(&path, default)?;
        written.push(path);
    }

    Ok(written)
}

/// Flatten a tera error and its causes into one line
pub(crate) fn describe(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Filter to convert a name to a Go exported identifier
fn pascal_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("pascal filter expects a string"))?;

    Ok(Value::String(pascal_case(s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_embedded_templates() {
        let tera = load_templates(None).unwrap();
        let names: Vec<&str> = tera.get_template_names().collect();
        for (name, _) in TEMPLATES {
            assert!(names.contains(&name), "missing template {}", name);
        }
    }

    #[test]
    fn test_custom_template_overrides_default() {
        let home = TempDir::new().unwrap();
        fs::create_dir_all(home.path().join(TEMPLATE_DIR)).unwrap();
        fs::write(template_path(home.path(), "etc"), "Name: {{ service }}-custom").unwrap();

        let tera = load_templates(Some(home.path())).unwrap();
        let mut context = tera::Context::new();
        context.insert("service", "greet");
        assert_eq!(tera.render("etc", &context).unwrap(), "Name: greet-custom");
    }

    #[test]
    fn test_broken_custom_template_is_an_error() {
        let home = TempDir::new().unwrap();
        fs::create_dir_all(home.path().join(TEMPLATE_DIR)).unwrap();
        fs::write(template_path(home.path(), "main"), "{{ unclosed").unwrap();

        let err = load_templates(Some(home.path())).unwrap_err();
        assert!(matches!(err, GeneratorError::Template(ref m) if m.contains("main")));
    }

    #[test]
    fn test_write_default_templates_keeps_existing_files() {
        let home = TempDir::new().unwrap();
        fs::create_dir_all(home.path().join(TEMPLATE_DIR)).unwrap();
        fs::write(template_path(home.path(), "client"), "custom").unwrap();

        let written = write_default_templates(home.path()).unwrap();
        assert_eq!(written.len(), TEMPLATES.len() - 1);
        assert_eq!(
            fs::read_to_string(template_path(home.path(), "client")).unwrap(),
            "custom"
        );
        assert!(template_path(home.path(), "main").is_file());
    }

    #[test]
    fn test_pascal_filter() {
        let result = pascal_filter(&Value::String("user_service".to_string()), &HashMap::new());
        assert_eq!(result.unwrap(), Value::String("UserService".to_string()));
        assert!(pascal_filter(&Value::Bool(true), &HashMap::new()).is_err());
    }
}

//! Built-in stage providers.

use super::registry::{StageContext, StageProvider};
use super::types::{Capability, StageDescriptor, StageParams};
use crate::consts::ICON_MODULE_PREFIX;
use crate::error::ConfigError;
use crate::options::{COMPONENT_COMPILER_TARGET, ICON_COMPILER};

/// Compiles single-file components for the requested runtime.
pub struct ComponentCompilerStage;

impl ComponentCompilerStage {
  const EXTENSIONS: &[&'static str] = &["vue"];
}

impl StageProvider for ComponentCompilerStage {
  fn capability(&self) -> Capability {
    Capability::ComponentCompile
  }

  fn describe(&self, ctx: &StageContext<'_>) -> Result<StageDescriptor, ConfigError> {
    let target = ctx.options.component_compiler_target.ok_or_else(|| ConfigError::InvalidOption {
      key: COMPONENT_COMPILER_TARGET.to_string(),
      message: "required by the component compiler stage".to_string(),
    })?;

    Ok(StageDescriptor::new(
      format!("component-compiler:{}", target),
      Capability::ComponentCompile,
      StageParams::ComponentCompiler {
        target,
        extensions: Self::EXTENSIONS.iter().map(|e| e.to_string()).collect(),
      },
    ))
  }

  fn handled_extensions(&self) -> &[&'static str] {
    Self::EXTENSIONS
  }
}

/// Resolves `~icons/<collection>/<name>` imports to generated icon components.
pub struct IconResolverStage;

impl StageProvider for IconResolverStage {
  fn capability(&self) -> Capability {
    Capability::IconGenerate
  }

  fn describe(&self, ctx: &StageContext<'_>) -> Result<StageDescriptor, ConfigError> {
    let compiler = ctx.options.icon_compiler.ok_or_else(|| ConfigError::InvalidOption {
      key: ICON_COMPILER.to_string(),
      message: "required by the icon resolver stage".to_string(),
    })?;

    Ok(StageDescriptor::new(
      format!("icon-resolver:{}", compiler),
      Capability::IconGenerate,
      StageParams::IconResolver {
        compiler,
        module_prefix: ICON_MODULE_PREFIX.to_string(),
      },
    ))
  }
}

/// Packages the rewritten sources into an extension according to the manifest.
pub struct PackageStage;

impl StageProvider for PackageStage {
  fn capability(&self) -> Capability {
    Capability::Package
  }

  fn describe(&self, ctx: &StageContext<'_>) -> Result<StageDescriptor, ConfigError> {
    Ok(StageDescriptor::new(
      format!("package:mv{}", ctx.manifest_ref.manifest_version),
      Capability::Package,
      StageParams::Package {
        manifest: ctx.manifest_ref.clone(),
        entry_points: ctx.entry_points.clone(),
      },
    ))
  }
}

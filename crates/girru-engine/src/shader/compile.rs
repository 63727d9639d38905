//! Per-stage WGSL compilation through the naga front end.

use crate::error::ShaderError;

use super::ShaderStage;

/// Parses and validates one stage's WGSL source.
///
/// Compilation is per stage: a diagnostic from this function always names
/// the stage it belongs to, with the compiler output carried verbatim.
pub(crate) fn compile_stage(
    stage: ShaderStage,
    source: &str,
) -> Result<naga::Module, ShaderError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|err| ShaderError::Compile {
        stage,
        message: err.emit_to_string(source),
    })?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator
        .validate(&module)
        .map_err(|err| ShaderError::Compile {
            stage,
            message: err.emit_to_string(source),
        })?;

    Ok(module)
}

/// Resolves the entry point for `stage` within its compiled module.
///
/// This is the link step: both stages may compile cleanly and still fail
/// here when a module does not expose an entry point of the right kind.
pub(crate) fn find_entry_point(
    module: &naga::Module,
    stage: ShaderStage,
) -> Result<String, ShaderError> {
    module
        .entry_points
        .iter()
        .find(|ep| ep.stage == stage.naga_stage())
        .map(|ep| ep.name.clone())
        .ok_or_else(|| ShaderError::Link {
            message: format!("module for the {stage} stage has no {stage} entry point"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_VS: &str = "
        @vertex
        fn vs_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
            return vec4<f32>(position, 1.0);
        }
    ";

    const VALID_FS: &str = "
        @fragment
        fn fs_main() -> @location(0) vec4<f32> {
            return vec4<f32>(1.0, 0.5, 0.2, 1.0);
        }
    ";

    #[test]
    fn valid_stages_compile() {
        assert!(compile_stage(ShaderStage::Vertex, VALID_VS).is_ok());
        assert!(compile_stage(ShaderStage::Fragment, VALID_FS).is_ok());
    }

    #[test]
    fn syntax_error_is_reported_against_its_stage() {
        let err = compile_stage(ShaderStage::Vertex, "fn broken( {").unwrap_err();
        match err {
            ShaderError::Compile { stage, message } => {
                assert_eq!(stage, ShaderStage::Vertex);
                assert!(!message.is_empty());
            }
            other => panic!("expected Compile error, got {other:?}"),
        }
    }

    #[test]
    fn validation_error_is_a_compile_error() {
        // Parses, but the vertex entry point fails validation: the
        // position built-in must be a vec4.
        let source = "
            @vertex
            fn vs_main() -> @builtin(position) f32 {
                return 1.0;
            }
        ";
        let err = compile_stage(ShaderStage::Vertex, source).unwrap_err();
        assert!(matches!(
            err,
            ShaderError::Compile {
                stage: ShaderStage::Vertex,
                ..
            }
        ));
    }

    #[test]
    fn entry_point_resolution() {
        let module = compile_stage(ShaderStage::Vertex, VALID_VS).unwrap();
        assert_eq!(
            find_entry_point(&module, ShaderStage::Vertex).unwrap(),
            "vs_main"
        );

        // A vertex-only module cannot provide the fragment entry point.
        let err = find_entry_point(&module, ShaderStage::Fragment).unwrap_err();
        assert!(matches!(err, ShaderError::Link { .. }));
    }
}

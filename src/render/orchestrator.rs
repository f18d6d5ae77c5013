//! Drives planning, framing, rasterization and output for render targets.

use log::{debug, info};

use super::naming::TargetLabel;
use super::sink::ImageSink;
use super::state::{RenderState, StateSelector};
use super::target::RenderTarget;
use crate::camera::{frame_with_mode, CameraFrame};
use crate::chain_list::{self, ResolvedChain};
use crate::engine::{PostProcessing, RasterRequest, RenderEngine, RenderedImage};
use crate::error::MolsnapError;
use crate::options::Options;
use crate::plan::{classify, plan, PlanOptions, RenderPlan};
use crate::structure::{query, Assembly, Model, Structure, Trajectory};

/// An explicit chain-list selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainListRequest {
    /// 1-based assembly index.
    pub assembly: usize,
    /// Chain-list tokens.
    pub tokens: Vec<String>,
}

/// Optional extras of a render-all run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllRequest {
    /// Also render every model overlaid (multi-model inputs only).
    pub ensemble: bool,
    /// Also render one chain-list selection.
    pub chain_list: Option<ChainListRequest>,
}

/// A target whose structure has been built and whose name is known.
struct Prepared {
    label: TargetLabel,
    structure: Structure,
    selector: StateSelector,
}

/// Renders targets of one trajectory through an engine into a sink.
pub struct Orchestrator<'a, E, S> {
    trajectory: &'a Trajectory,
    stem: String,
    options: Options,
    engine: E,
    sink: S,
}

impl<'a, E: RenderEngine, S: ImageSink> Orchestrator<'a, E, S> {
    /// Orchestrator naming its outputs after `stem` (the input file stem).
    pub fn new(
        trajectory: &'a Trajectory,
        stem: impl Into<String>,
        options: Options,
        engine: E,
        sink: S,
    ) -> Self {
        Self {
            trajectory,
            stem: stem.into(),
            options,
            engine,
            sink,
        }
    }

    /// The engine handle.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The image sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Give back the engine and sink.
    pub fn into_parts(self) -> (E, S) {
        (self.engine, self.sink)
    }

    /// Every target a render-all run produces, in output order: models,
    /// assemblies, polymer chains with atoms, then the optional ensemble
    /// and chain list.
    #[must_use]
    pub fn targets(trajectory: &Trajectory, request: &AllRequest) -> Vec<RenderTarget> {
        let mut targets: Vec<RenderTarget> =
            (1..=trajectory.frame_count()).map(RenderTarget::Model).collect();
        if let Some(model) = trajectory.representative() {
            targets.extend((1..=model.assemblies.len()).map(RenderTarget::Assembly));
            targets.extend(
                model
                    .polymer_chains()
                    .filter(|c| model.atoms.iter().any(|a| a.chain_id == c.id))
                    .map(|c| RenderTarget::Chain(c.id.clone())),
            );
        }
        if request.ensemble && trajectory.frame_count() > 1 {
            targets.push(RenderTarget::Ensemble);
        }
        if let Some(chain_list) = &request.chain_list {
            targets.push(RenderTarget::ChainList {
                assembly: chain_list.assembly,
                tokens: chain_list.tokens.clone(),
            });
        }
        targets
    }

    /// Render one model by 1-based index.
    pub fn render_model(&mut self, index: usize) -> Result<String, MolsnapError> {
        self.render_target(&RenderTarget::Model(index))
    }

    /// Render one assembly of the representative model by 1-based index.
    pub fn render_assembly(&mut self, index: usize) -> Result<String, MolsnapError> {
        self.render_target(&RenderTarget::Assembly(index))
    }

    /// Render one chain of the representative model.
    pub fn render_chain(&mut self, chain: &str) -> Result<String, MolsnapError> {
        self.render_target(&RenderTarget::Chain(chain.to_owned()))
    }

    /// Render every model overlaid.
    pub fn render_ensemble(&mut self) -> Result<String, MolsnapError> {
        self.render_target(&RenderTarget::Ensemble)
    }

    /// Render a chain-list selection over an assembly.
    pub fn render_chain_list(
        &mut self,
        assembly: usize,
        tokens: &[String],
    ) -> Result<String, MolsnapError> {
        self.render_target(&RenderTarget::ChainList {
            assembly,
            tokens: tokens.to_vec(),
        })
    }

    /// Render every target of the trajectory. All targets are validated
    /// before the first image is drawn. Returns the image file names.
    pub fn render_all(&mut self, request: &AllRequest) -> Result<Vec<String>, MolsnapError> {
        let targets = Self::targets(self.trajectory, request);
        for target in &targets {
            self.validate(target)
                .map_err(|e| e.for_target(target.to_string()))?;
        }
        info!("rendering {} target(s)", targets.len());
        targets.iter().map(|t| self.render_target(t)).collect()
    }

    /// Render a single target. Returns the image file name.
    pub fn render_target(&mut self, target: &RenderTarget) -> Result<String, MolsnapError> {
        self.prepare(target)
            .and_then(|prepared| self.draw(target, prepared))
            .map_err(|e| e.for_target(target.to_string()))
    }

    fn representative(&self) -> Result<&'a Model, MolsnapError> {
        self.trajectory
            .representative()
            .ok_or_else(|| MolsnapError::StructureLoad("trajectory has no models".to_owned()))
    }

    fn assembly(&self, index: usize) -> Result<(&'a Model, &'a Assembly), MolsnapError> {
        let model = self.representative()?;
        let assembly = model.assembly(index).ok_or_else(|| {
            MolsnapError::TargetNotFound(format!(
                "assembly {index} (model has {})",
                model.assemblies.len()
            ))
        })?;
        Ok((model, assembly))
    }

    /// The expanded assembly; an assembly that selects no atoms is an
    /// input error.
    fn assembly_structure(&self, index: usize) -> Result<(&'a Assembly, Structure), MolsnapError> {
        let (model, assembly) = self.assembly(index)?;
        let structure = Structure::assembly(model, 0, assembly);
        if structure.is_empty() {
            return Err(MolsnapError::EmptySelection(format!(
                "assembly {} names no chains with atoms",
                assembly.id
            )));
        }
        Ok((assembly, structure))
    }

    /// Parse and resolve a chain list, and build its selection.
    fn chain_list(
        &self,
        assembly: usize,
        tokens: &[String],
    ) -> Result<(&'a Assembly, Vec<ResolvedChain>, Structure), MolsnapError> {
        let runs = chain_list::parse(tokens).map_err(MolsnapError::ChainList)?;
        let (model, assembly) = self.assembly(assembly)?;
        let resolved = chain_list::resolve(assembly, &runs).map_err(MolsnapError::ChainList)?;
        let full = Structure::assembly(model, 0, assembly);
        let selection = chain_list::select(&full, &resolved);
        if selection.is_empty() {
            return Err(MolsnapError::EmptySelection(format!(
                "chain list `{}` selects no atoms",
                tokens.join(" ")
            )));
        }
        Ok((assembly, resolved, selection))
    }

    /// Input checks that must pass before any image of a run is drawn.
    fn validate(&self, target: &RenderTarget) -> Result<(), MolsnapError> {
        match target {
            RenderTarget::Model(n) => self.model(*n).map(|_| ()),
            RenderTarget::Assembly(n) => self.assembly_structure(*n).map(|_| ()),
            RenderTarget::Chain(name) => self.chain(name).map(|_| ()),
            RenderTarget::ChainList { assembly, tokens } => {
                self.chain_list(*assembly, tokens).map(|_| ())
            }
            RenderTarget::Ensemble => self.representative().map(|_| ()),
        }
    }

    fn model(&self, index: usize) -> Result<&'a Model, MolsnapError> {
        self.trajectory.model(index).ok_or_else(|| {
            MolsnapError::TargetNotFound(format!(
                "model {index} (trajectory has {})",
                self.trajectory.frame_count()
            ))
        })
    }

    fn chain(&self, name: &str) -> Result<Structure, MolsnapError> {
        let model = self.representative()?;
        if model.chain(name).is_none() && !model.atoms.iter().any(|a| a.chain_id == name) {
            return Err(MolsnapError::TargetNotFound(format!("chain {name}")));
        }
        let selection = query::chain(&Structure::from_model(model, 0), name, None);
        if selection.is_empty() {
            return Err(MolsnapError::EmptySelection(format!("chain {name} has no atoms")));
        }
        Ok(selection)
    }

    fn prepare(&self, target: &RenderTarget) -> Result<Prepared, MolsnapError> {
        Ok(match target {
            RenderTarget::Model(n) => Prepared {
                label: TargetLabel::Model(*n),
                structure: Structure::from_model(self.model(*n)?, n - 1),
                selector: StateSelector::Model { model_index: *n },
            },
            RenderTarget::Assembly(n) => {
                let (assembly, structure) = self.assembly_structure(*n)?;
                Prepared {
                    label: TargetLabel::Assembly(assembly.id.clone()),
                    structure,
                    selector: StateSelector::Assembly {
                        assembly_id: assembly.id.clone(),
                    },
                }
            }
            RenderTarget::Chain(name) => Prepared {
                label: TargetLabel::Chain(name.clone()),
                structure: self.chain(name)?,
                selector: StateSelector::Chain {
                    chain: name.clone(),
                },
            },
            RenderTarget::ChainList { assembly, tokens } => {
                let (assembly, resolved, structure) = self.chain_list(*assembly, tokens)?;
                Prepared {
                    label: TargetLabel::ChainList {
                        assembly_id: assembly.id.clone(),
                        pair_spec: chain_list::pair_spec(&resolved),
                    },
                    structure,
                    selector: StateSelector::ChainList {
                        assembly_id: assembly.id.clone(),
                        chains: resolved
                            .iter()
                            .map(|c| chain_list::pair_spec(std::slice::from_ref(c)))
                            .collect(),
                    },
                }
            }
            RenderTarget::Ensemble => Prepared {
                label: TargetLabel::Models,
                structure: Structure::ensemble(&self.trajectory.models),
                selector: StateSelector::Models {
                    model_count: self.trajectory.frame_count(),
                },
            },
        })
    }

    fn draw(&mut self, target: &RenderTarget, prepared: Prepared) -> Result<String, MolsnapError> {
        let size_class = classify(&prepared.structure);
        let plan = plan(
            target.kind(),
            &prepared.structure,
            size_class,
            &PlanOptions::from(&self.options),
        );
        debug!("{target}: {size_class:?}, {} atoms", prepared.structure.atom_count());

        self.engine.clear();
        let drawn = self.rasterize(&plan, &prepared.structure);
        self.engine.clear();
        let (image, frame) = drawn?;

        let format = self.options.output.format;
        let file_name = prepared.label.image_file(&self.stem, format);
        self.sink.write_image(&file_name, &image, format)?;
        if self.options.output.save_state {
            let state = RenderState {
                id: prepared.label.name(&self.stem),
                color_theme: plan.color_theme.name().to_owned(),
                camera_state: frame,
                selector: prepared.selector,
            };
            self.sink
                .write_state(&prepared.label.state_file(&self.stem), &state)?;
        }
        info!("{target} -> {file_name}");
        Ok(file_name)
    }

    fn rasterize(
        &mut self,
        plan: &RenderPlan,
        full: &Structure,
    ) -> Result<(RenderedImage, CameraFrame), MolsnapError> {
        for layer in &plan.layers {
            self.engine.add_layer(layer).map_err(MolsnapError::Engine)?;
        }
        let frame = frame_with_mode(&plan.focus, full, &self.options.camera)
            .map_err(MolsnapError::Framing)?;
        self.engine.set_camera(&frame);
        let image = self
            .engine
            .rasterize(&RasterRequest {
                width: self.options.output.width,
                height: self.options.output.height,
                post: PostProcessing::for_size_class(plan.size_class),
            })
            .map_err(MolsnapError::Engine)?;
        Ok((image, frame))
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::engine::EngineError;
    use crate::plan::{LayerKind, RepresentationLayer};
    use crate::testing::ModelBuilder;

    /// Engine that records what it was asked to do.
    #[derive(Default)]
    struct RecordingEngine {
        layers: Vec<LayerKind>,
        camera: Option<CameraFrame>,
        requests: Vec<RasterRequest>,
        layers_at_raster: Vec<usize>,
        added: usize,
        fail_raster: bool,
    }

    impl RenderEngine for RecordingEngine {
        fn add_layer(&mut self, layer: &RepresentationLayer) -> Result<(), EngineError> {
            self.layers.push(layer.kind);
            self.added += 1;
            Ok(())
        }

        fn set_camera(&mut self, frame: &CameraFrame) {
            self.camera = Some(*frame);
        }

        fn rasterize(&mut self, request: &RasterRequest) -> Result<RenderedImage, EngineError> {
            self.requests.push(*request);
            self.layers_at_raster.push(self.layers.len());
            if self.fail_raster {
                return Err(EngineError::Readback("device lost".to_owned()));
            }
            Ok(RenderedImage {
                width: 1,
                height: 1,
                rgba: vec![0, 0, 0, 255],
            })
        }

        fn clear(&mut self) {
            self.layers.clear();
            self.camera = None;
        }

        fn layer_count(&self) -> usize {
            self.layers.len()
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        images: Vec<String>,
        states: Vec<(String, RenderState)>,
    }

    impl ImageSink for RecordingSink {
        fn write_image(
            &mut self,
            file_name: &str,
            _image: &RenderedImage,
            _format: crate::options::ImageFormat,
        ) -> Result<(), MolsnapError> {
            self.images.push(file_name.to_owned());
            Ok(())
        }

        fn write_state(&mut self, file_name: &str, state: &RenderState) -> Result<(), MolsnapError> {
            self.states.push((file_name.to_owned(), state.clone()));
            Ok(())
        }
    }

    /// Two frames of: polymer chains A, B, C, water W, ligand L; one
    /// assembly with two operators over A and B.
    fn trajectory() -> Trajectory {
        let model = ModelBuilder::default()
            .protein("A", "1", 15, Vec3::ZERO)
            .protein("B", "1", 15, Vec3::Y * 15.0)
            .protein("C", "2", 12, Vec3::Z * 15.0)
            .water("W", "3", 4, Vec3::splat(-10.0))
            .ligand("L", "4", "HEM", Vec3::splat(6.0))
            .assembly(
                "1",
                &["A", "B"],
                &[("ASM_1", &[1], Vec3::ZERO), ("ASM_2", &[2], Vec3::X * 60.0)],
            )
            .build();
        let mut moved = model.clone();
        for atom in &mut moved.atoms {
            atom.position += Vec3::X;
        }
        Trajectory {
            models: vec![model, moved],
        }
    }

    fn orchestrator(
        trajectory: &Trajectory,
        options: Options,
    ) -> Orchestrator<'_, RecordingEngine, RecordingSink> {
        Orchestrator::new(
            trajectory,
            "1abc",
            options,
            RecordingEngine::default(),
            RecordingSink::default(),
        )
    }

    fn tokens(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_owned).collect()
    }

    #[test]
    fn render_all_writes_one_image_per_target() {
        let t = trajectory();
        let mut o = orchestrator(&t, Options::default());
        let written = o.render_all(&AllRequest::default()).unwrap();
        assert_eq!(
            written,
            vec![
                "1abc_model-1.png",
                "1abc_model-2.png",
                "1abc_assembly-1.png",
                "1abc_chain-A.png",
                "1abc_chain-B.png",
                "1abc_chain-C.png",
            ]
        );
        assert_eq!(o.sink().images, written);
        assert!(o.sink().states.is_empty());
    }

    #[test]
    fn names_are_deterministic_across_runs() {
        let t = trajectory();
        let request = AllRequest {
            ensemble: true,
            chain_list: Some(ChainListRequest {
                assembly: 1,
                tokens: tokens("chain A operator-name ASM_2 chain B"),
            }),
        };
        let first = orchestrator(&t, Options::default()).render_all(&request).unwrap();
        let second = orchestrator(&t, Options::default()).render_all(&request).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 8);
        assert_eq!(first[6], "1abc_models.png");
        assert_eq!(first[7], "1abc_chain-list-assembly-1-A.ASM_2-B.png");
    }

    #[test]
    fn surface_is_empty_after_every_target() {
        let t = trajectory();
        let mut o = orchestrator(&t, Options::default());
        let _ = o.render_all(&AllRequest::default()).unwrap();
        let engine = o.engine();
        assert_eq!(engine.layer_count(), 0);
        assert!(engine.camera.is_none());
        // Each target saw only its own layers.
        assert_eq!(engine.layers_at_raster.len(), 6);
        assert!(engine.layers_at_raster.iter().all(|&n| n > 0));
        assert_eq!(engine.layers_at_raster.iter().sum::<usize>(), engine.added);
    }

    #[test]
    fn surface_is_cleared_after_a_failed_target() {
        let t = trajectory();
        let mut o = orchestrator(&t, Options::default());
        o.engine.fail_raster = true;
        let err = o.render_model(1).unwrap_err();
        assert!(matches!(
            &err,
            MolsnapError::Target { target, source }
                if target == "model 1" && matches!(**source, MolsnapError::Engine(_))
        ));
        assert_eq!(o.engine().layer_count(), 0);
        assert!(o.sink().images.is_empty());
    }

    #[test]
    fn bad_chain_list_fails_before_any_rendering() {
        let t = trajectory();
        let mut o = orchestrator(&t, Options::default());
        let request = AllRequest {
            ensemble: false,
            chain_list: Some(ChainListRequest {
                assembly: 1,
                tokens: tokens("chain A operator-list 999"),
            }),
        };
        let err = o.render_all(&request).unwrap_err();
        assert!(err.to_string().contains("999"), "{err}");
        assert_eq!(o.engine().added, 0);
        assert!(o.engine().requests.is_empty());
        assert!(o.sink().images.is_empty());
    }

    #[test]
    fn empty_assembly_fails_before_any_rendering() {
        let t = Trajectory {
            models: vec![ModelBuilder::default()
                .protein("A", "1", 15, Vec3::ZERO)
                .assembly("1", &["Z"], &[("ASM_1", &[1], Vec3::ZERO)])
                .build()],
        };
        let mut o = orchestrator(&t, Options::default());
        let err = o.render_all(&AllRequest::default()).unwrap_err();
        assert!(matches!(
            &err,
            MolsnapError::Target { target, source }
                if target == "assembly 1" && matches!(**source, MolsnapError::EmptySelection(_))
        ));
        assert!(o.sink().images.is_empty());
        assert_eq!(o.engine().added, 0);

        let err = o.render_assembly(1).unwrap_err();
        assert!(err.to_string().starts_with("assembly 1: empty selection"), "{err}");
        assert_eq!(o.engine().added, 0);
    }

    #[test]
    fn water_and_ligand_chains_are_not_targets() {
        let t = trajectory();
        let targets = Orchestrator::<RecordingEngine, RecordingSink>::targets(&t, &AllRequest::default());
        assert!(!targets.contains(&RenderTarget::Chain("W".to_owned())));
        assert!(!targets.contains(&RenderTarget::Chain("L".to_owned())));
    }

    #[test]
    fn ensemble_needs_more_than_one_frame() {
        let mut t = trajectory();
        t.models.truncate(1);
        let request = AllRequest {
            ensemble: true,
            chain_list: None,
        };
        let targets = Orchestrator::<RecordingEngine, RecordingSink>::targets(&t, &request);
        assert!(!targets.contains(&RenderTarget::Ensemble));
    }

    #[test]
    fn missing_targets_are_reported_with_context() {
        let t = trajectory();
        let mut o = orchestrator(&t, Options::default());
        assert_eq!(
            o.render_model(3).unwrap_err().to_string(),
            "model 3: not found: model 3 (trajectory has 2)"
        );
        assert!(o.render_assembly(2).is_err());
        assert!(o.render_chain("Z").is_err());
        assert!(o.render_model(0).is_err());
    }

    #[test]
    fn post_processing_only_for_big_structures() {
        let t = trajectory();
        let mut o = orchestrator(&t, Options::default());
        let _ = o.render_chain("A").unwrap();
        assert_eq!(o.engine().requests[0].post, PostProcessing::default());

        let big = Trajectory {
            models: vec![ModelBuilder::default().protein("A", "1", 4001, Vec3::ZERO).build()],
        };
        let mut o = orchestrator(&big, Options::default());
        let _ = o.render_model(1).unwrap();
        let request = o.engine().requests[0];
        assert!(request.post.ambient_occlusion && request.post.outline);
    }

    #[test]
    fn state_sidecars_follow_images() {
        let t = trajectory();
        let mut options = Options::default();
        options.output.save_state = true;
        options.output.format = crate::options::ImageFormat::Jpeg;
        let mut o = orchestrator(&t, options);
        let name = o
            .render_chain_list(1, &tokens("chain A operator-list 2 chain B"))
            .unwrap();
        assert_eq!(name, "1abc_chain-list-assembly-1-A.ASM_2-B.jpeg");
        let (file, state) = &o.sink().states[0];
        assert_eq!(file, "1abc_chain-list-assembly-1-A.ASM_2-B.json");
        assert_eq!(state.id, "1abc_chain-list-assembly-1-A.ASM_2-B");
        assert_eq!(
            state.selector,
            StateSelector::ChainList {
                assembly_id: "1".to_owned(),
                chains: vec!["A.ASM_2".to_owned(), "B".to_owned()],
            }
        );
        assert_eq!(state.color_theme, "unit-index");

        let _ = o.render_ensemble().unwrap();
        assert_eq!(
            o.sink().states[1].1.selector,
            StateSelector::Models { model_count: 2 }
        );
    }
}

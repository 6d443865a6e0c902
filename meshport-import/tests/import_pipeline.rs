//! End-to-end import tests against a synthetic Meshroom cache tree

use meshport_core::{Scene, Transform3D, Vector3f};
use meshport_import::{
    propagate_focal, ImportError, ImportOptions, ImportReport, ImportWarning, Importer,
    PipelineStep, PointCloudRenderer, SPARSE_CLOUD_NAME,
};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

const GRAPH: &str = r#"{
    "header": {"releaseVersion": "2019.1.0"},
    "graph": {
        "CameraInit_1": {"nodeType": "CameraInit", "uids": {"0": "aaa"}, "outputs": {}},
        "StructureFromMotion_1": {
            "nodeType": "StructureFromMotion",
            "uids": {"0": "sfm123"},
            "outputs": {
                "output": "{cache}/{nodeType}/{uid0}/sfm.abc",
                "outputViewsAndPoses": "{cache}/{nodeType}/{uid0}/cameras.sfm"
            }
        },
        "PrepareDenseScene_1": {
            "nodeType": "PrepareDenseScene",
            "uids": {"0": "pds456"},
            "outputs": {"output": "{cache}/{nodeType}/{uid0}"}
        },
        "Meshing_1": {
            "nodeType": "Meshing",
            "uids": {"0": "mesh789"},
            "outputs": {"output": "{cache}/{nodeType}/{uid0}/mesh.obj"}
        },
        "Texturing_1": {
            "nodeType": "Texturing",
            "uids": {"0": "tex012"},
            "outputs": {"outputMesh": "{cache}/{nodeType}/{uid0}/texturedMesh.obj"}
        }
    }
}"#;

const CLOUD_PLY: &str = "ply\n\
format ascii 1.0\n\
element vertex 3\n\
property float x\n\
property float y\n\
property float z\n\
property uchar red\n\
property uchar green\n\
property uchar blue\n\
end_header\n\
0.0 0.0 0.0 255 0 0\n\
1.0 0.0 0.0 0 255 0\n\
0.0 1.0 0.0 0 0 255\n";

const DENSE_OBJ: &str = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
f 1 2 3
";

const TEXTURED_OBJ: &str = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 0.0 1.0
f 1/1 2/2 3/3
";

fn sfm_json(root: &Path) -> String {
    let image = |index: u32| format!("{}/images/IMG_{}.jpg", root.display(), index);
    serde_json::json!({
        "views": [
            {
                "viewId": "1001", "poseId": "1001", "intrinsicId": "500",
                "path": image(1001), "width": "4000", "height": "3000",
                "metadata": {"Exif:FocalLength": "36"}
            },
            {
                "viewId": "1002", "poseId": "1002", "intrinsicId": "500",
                "path": image(1002), "width": "4000", "height": "3000",
                "metadata": {"Exif:FocalLength": "36"}
            }
        ],
        "intrinsics": [
            {"intrinsicId": "500", "pxFocalLength": "3000", "principalPoint": ["2000", "1500"]}
        ],
        "poses": [
            {
                "poseId": "1001",
                "pose": {"transform": {
                    "rotation": ["1", "0", "0", "0", "1", "0", "0", "0", "1"],
                    "center": ["0", "0", "0"]
                }}
            },
            {
                "poseId": "1002",
                "pose": {"transform": {
                    "rotation": ["1", "0", "0", "0", "1", "0", "0", "0", "1"],
                    "center": ["1", "2", "3"]
                }}
            }
        ]
    })
    .to_string()
}

/// Build a complete fake project tree and return (root, project file)
fn project_fixture(name: &str) -> (PathBuf, PathBuf) {
    let root = std::env::temp_dir().join(name);
    let _ = std::fs::remove_dir_all(&root);

    let cache = root.join("MeshroomCache");
    let sfm_dir = cache.join("StructureFromMotion/sfm123");
    let undistorted_dir = cache.join("PrepareDenseScene/pds456");
    let meshing_dir = cache.join("Meshing/mesh789");
    let texturing_dir = cache.join("Texturing/tex012");
    for dir in [&sfm_dir, &undistorted_dir, &meshing_dir, &texturing_dir] {
        std::fs::create_dir_all(dir).unwrap();
    }

    let project = root.join("project.mg");
    std::fs::write(&project, GRAPH).unwrap();
    std::fs::write(sfm_dir.join("cameras.sfm"), sfm_json(&root)).unwrap();
    std::fs::write(sfm_dir.join("cloud_and_poses.ply"), CLOUD_PLY).unwrap();
    std::fs::write(undistorted_dir.join("1001.exr"), b"exr").unwrap();
    std::fs::write(undistorted_dir.join("1002.exr"), b"exr").unwrap();
    std::fs::write(meshing_dir.join("mesh.obj"), DENSE_OBJ).unwrap();
    std::fs::write(texturing_dir.join("texturedMesh.obj"), TEXTURED_OBJ).unwrap();

    (root, project)
}

fn run_import(project: &Path, options: ImportOptions) -> (Scene, ImportReport) {
    let mut scene = Scene::new();
    let report = Importer::new(options).import(project, &mut scene).unwrap();
    (scene, report)
}

#[test]
fn full_import_populates_scene() {
    let (root, project) = project_fixture("meshport_import_full");
    let options = ImportOptions {
        dense: true,
        ..ImportOptions::default()
    };
    let (scene, report) = run_import(&project, options);

    assert!(report.warnings.is_empty(), "warnings: {:?}", report.warnings);
    assert_eq!(report.cameras, 2);
    assert_eq!(report.meshes, 2);
    assert_eq!(report.sparse_points, 3);

    // collection layout: project container with a Views child
    assert_eq!(scene.collections.len(), 1);
    let container = &scene.collections[0];
    assert_eq!(container.name, "project");
    assert_eq!(container.children[0].name, "Views");

    // render resolution follows the first view
    assert_eq!(scene.render.resolution_x, 4000);
    assert_eq!(scene.render.resolution_y, 3000);

    let cameras = scene.cameras();
    let first = cameras
        .iter()
        .find(|camera| camera.name == "View 1001")
        .unwrap();
    assert!((first.lens - 27.0).abs() < 1e-5);
    assert!((first.sensor_width - 36.0).abs() < 1e-5);
    assert!(first.shift_x.abs() < 1e-6);
    assert!(first.shift_y.abs() < 1e-6);
    let background = first.background.as_ref().unwrap();
    assert_eq!(
        background.path,
        root.join("MeshroomCache/PrepareDenseScene/pds456/1001.exr")
    );

    // pose center and axis flip
    let second = cameras
        .iter()
        .find(|camera| camera.name == "View 1002")
        .unwrap();
    let expected = Transform3D::rot_x_180().with_translation(Vector3f::new(1.0, 2.0, 3.0));
    assert!((second.transform.matrix - expected.matrix).norm() < 1e-5);

    let clouds = scene.point_clouds();
    assert_eq!(clouds.len(), 1);
    assert_eq!(clouds[0].name, SPARSE_CLOUD_NAME);
    assert_eq!(clouds[0].points.len(), 3);
    assert_eq!(clouds[0].colors.as_ref().unwrap()[0], [255, 0, 0]);

    let meshes = scene.meshes();
    assert_eq!(meshes.len(), 2);
    for mesh in &meshes {
        assert!(mesh.transform.is_identity(1e-6));
    }
    let textured = meshes
        .iter()
        .find(|mesh| mesh.name == "texturedMesh")
        .unwrap();
    assert!(textured.mesh.uvs.is_some());

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn missing_texturing_node_skips_textured_mesh() {
    let (root, project) = project_fixture("meshport_import_no_texturing");
    let mut graph: serde_json::Value = serde_json::from_str(GRAPH).unwrap();
    graph["graph"].as_object_mut().unwrap().remove("Texturing_1");
    std::fs::write(&project, graph.to_string()).unwrap();

    let (scene, report) = run_import(&project, ImportOptions::default());

    assert!(scene.meshes().is_empty());
    assert!(report
        .warnings
        .contains(&ImportWarning::MissingNode(PipelineStep::Texturing)));
    assert!(!report
        .warnings
        .iter()
        .any(|warning| matches!(warning, ImportWarning::MeshMissing { .. })));

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn alembic_sibling_means_wrong_format() {
    let (root, project) = project_fixture("meshport_import_abc");
    let sfm_dir = root.join("MeshroomCache/StructureFromMotion/sfm123");
    std::fs::remove_file(sfm_dir.join("cloud_and_poses.ply")).unwrap();
    std::fs::write(sfm_dir.join("cloud_and_poses.abc"), b"abc").unwrap();

    let (scene, report) = run_import(&project, ImportOptions::default());

    assert!(scene.point_clouds().is_empty());
    assert!(report
        .warnings
        .iter()
        .any(|warning| matches!(warning, ImportWarning::SparseCloudWrongFormat { .. })));
    assert!(!report
        .warnings
        .iter()
        .any(|warning| matches!(warning, ImportWarning::SparseCloudMissing { .. })));

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn absent_cloud_means_missing_reconstruction() {
    let (root, project) = project_fixture("meshport_import_no_cloud");
    let sfm_dir = root.join("MeshroomCache/StructureFromMotion/sfm123");
    std::fs::remove_file(sfm_dir.join("cloud_and_poses.ply")).unwrap();

    let (_, report) = run_import(&project, ImportOptions::default());

    assert!(report
        .warnings
        .iter()
        .any(|warning| matches!(warning, ImportWarning::SparseCloudMissing { .. })));

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn native_images_used_when_undistorted_off() {
    let (root, project) = project_fixture("meshport_import_native");
    let options = ImportOptions {
        undistorted: false,
        ..ImportOptions::default()
    };
    let (scene, report) = run_import(&project, options);

    let cameras = scene.cameras();
    let background = cameras[0].background.as_ref().unwrap();
    assert!(background.path.ends_with("images/IMG_1001.jpg"));

    // the native images do not exist in the fixture
    let image_warnings = report
        .warnings
        .iter()
        .filter(|warning| matches!(warning, ImportWarning::ViewImageMissing { .. }))
        .count();
    assert_eq!(image_warnings, 2);
    assert_eq!(report.cameras, 2);

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn options_gate_each_step() {
    let (root, project) = project_fixture("meshport_import_gated");
    let options = ImportOptions {
        views: false,
        sparse: false,
        dense: false,
        textured: false,
        ..ImportOptions::default()
    };
    let (scene, report) = run_import(&project, options);

    assert_eq!(scene.object_count(), 0);
    assert!(report.warnings.is_empty());
    // render settings untouched when views are skipped
    assert_eq!(scene.render.resolution_x, 1920);

    let _ = std::fs::remove_dir_all(&root);
}

#[derive(Clone, Default)]
struct RecordingRenderer {
    calls: Rc<RefCell<Vec<(String, usize, bool)>>>,
}

impl PointCloudRenderer for RecordingRenderer {
    fn render_cloud(
        &mut self,
        name: &str,
        points: &meshport_core::PointCloud<meshport_core::Point3f>,
        colors: Option<&[[u8; 3]]>,
    ) {
        self.calls
            .borrow_mut()
            .push((name.to_string(), points.len(), colors.is_some()));
    }
}

#[test]
fn injected_renderer_takes_the_sparse_cloud() {
    let (root, project) = project_fixture("meshport_import_renderer");
    let renderer = RecordingRenderer::default();
    let calls = renderer.calls.clone();

    let mut scene = Scene::new();
    Importer::new(ImportOptions::default())
        .with_point_cloud_renderer(Box::new(renderer))
        .import(&project, &mut scene)
        .unwrap();

    assert!(scene.point_clouds().is_empty());
    let calls = calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], (SPARSE_CLOUD_NAME.to_string(), 3, true));

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn focal_propagation_updates_imported_views() {
    let (root, project) = project_fixture("meshport_import_focal");
    let (mut scene, _) = run_import(&project, ImportOptions::default());

    for camera in scene.cameras_mut() {
        if camera.name == "View 1001" {
            camera.lens = 50.0;
            camera.shift_x = 0.01;
        }
    }
    let updated = propagate_focal(&mut scene, "View 1001").unwrap();
    assert_eq!(updated, 2);

    let cameras = scene.cameras();
    let second = cameras
        .iter()
        .find(|camera| camera.name == "View 1002")
        .unwrap();
    assert_eq!(second.lens, 50.0);
    assert_eq!(second.shift_x, 0.01);

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn missing_camera_file_is_fatal() {
    let (root, project) = project_fixture("meshport_import_no_sfm");
    std::fs::remove_file(root.join("MeshroomCache/StructureFromMotion/sfm123/cameras.sfm")).unwrap();

    let mut scene = Scene::new();
    let error = Importer::new(ImportOptions::default())
        .import(&project, &mut scene)
        .unwrap_err();
    assert!(matches!(error, ImportError::Read(_)));

    let _ = std::fs::remove_dir_all(&root);
}

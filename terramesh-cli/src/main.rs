//! terramesh command-line tool
//!
//! One-shot pipeline: load and clean a whitespace-delimited point cloud
//! file, persist the cleaned copy, reconstruct a 2.5D surface mesh by
//! Delaunay triangulation of the XY projection, optionally export it to
//! OBJ, then open the blocking interactive viewer.

use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;
use std::process;
use terramesh_core::Result;
use terramesh_io::{xyz, MeshWriter, ObjWriter, XyzReader};
use terramesh_surface::delaunay_surface_mesh;

const USAGE: &str = "Usage: terramesh <input_file> [save_to_obj]";

/// Default mesh export path, overwritten if present
const MESH_OUTPUT: &str = "mesh.obj";

#[derive(Parser, Debug)]
#[command(
    name = "terramesh",
    version,
    about = "Clean a 3D point cloud text file and reconstruct a surface mesh",
    override_usage = "terramesh <input_file> [save_to_obj]"
)]
struct Args {
    /// Input point cloud file: one point per line, whitespace-delimited X Y Z
    input_file: PathBuf,

    /// Export the reconstructed mesh to mesh.obj ("1", "true", "yes" or "y")
    save_to_obj: Option<String>,

    /// View the raw point cloud instead of the reconstructed mesh
    #[arg(long)]
    points: bool,
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return;
        }
        Err(_) => {
            // Missing/invalid arguments: usage on stdout, exit 1, no file I/O.
            println!("{USAGE}");
            process::exit(1);
        }
    };

    if let Err(err) = run(&args) {
        eprintln!("error: {err}");
        process::exit(err.exit_code());
    }
}

fn run(args: &Args) -> Result<()> {
    let cloud = XyzReader::read_point_cloud(&args.input_file)?;

    let cleaned_path = xyz::write_cleaned_cloud(&args.input_file, &cloud)?;
    println!("Points saved to {}", cleaned_path.display());

    let mesh = delaunay_surface_mesh(&cloud)?;

    if parse_truthy(args.save_to_obj.as_deref()) {
        ObjWriter::write_mesh(&mesh, MESH_OUTPUT)?;
        println!("Exported mesh to {MESH_OUTPUT}");
    }

    if args.points {
        terramesh_visualization::show_point_cloud(&cloud)
    } else {
        terramesh_visualization::show_mesh(&mesh)
    }
}

/// Parse the optional export flag.
///
/// Exactly the strings "1", "true", "yes" and "y" (case-insensitive,
/// surrounding whitespace ignored) count as true; anything else,
/// including absence, is false.
fn parse_truthy(value: Option<&str>) -> bool {
    value.is_some_and(|v| {
        matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "y"
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthy_membership() {
        for value in ["1", "true", "yes", "y", "TRUE", "Yes", "Y", " y "] {
            assert!(parse_truthy(Some(value)), "{value:?} should be truthy");
        }
        for value in ["0", "false", "no", "n", "", "2", "on", "yess"] {
            assert!(!parse_truthy(Some(value)), "{value:?} should be falsy");
        }
        assert!(!parse_truthy(None));
    }

    #[test]
    fn test_args_require_input_file() {
        let err = Args::try_parse_from(["terramesh"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_args_accept_export_flag_and_points_toggle() {
        let args = Args::try_parse_from(["terramesh", "scan.txt", "yes", "--points"]).unwrap();
        assert_eq!(args.input_file, PathBuf::from("scan.txt"));
        assert!(parse_truthy(args.save_to_obj.as_deref()));
        assert!(args.points);

        let args = Args::try_parse_from(["terramesh", "scan.txt"]).unwrap();
        assert!(!parse_truthy(args.save_to_obj.as_deref()));
        assert!(!args.points);
    }
}

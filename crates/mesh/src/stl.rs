//! Binary STL export and import.
//!
//! Layout (little-endian): 80-byte zeroed header, `u32` facet count, then per
//! facet the normal and three vertices as `f32` triples followed by a zero
//! `u16` attribute. Vertices are not shared between facets.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;

use engine_core::{DesignError, DesignResult, PointCloud, Triangulation};

use crate::facet::Facet;
use crate::mesh::TriangleMesh;

/// Write `mesh` as binary STL to any writer.
pub fn write_stl<W: Write>(writer: &mut W, mesh: &TriangleMesh) -> std::io::Result<()> {
    let triangles: Vec<stl_io::Triangle> = mesh.facets().map(|f| stl_io::Triangle::from(&f)).collect();
    stl_io::write_stl(writer, triangles.iter())
}

/// Write a design's points and triangulation to an STL file at `path`.
pub fn export_stl(path: &Path, points: &PointCloud, triangulation: &Triangulation) -> DesignResult<()> {
    save_mesh(path, &TriangleMesh::new(points, triangulation))
}

/// Write an assembled mesh to an STL file at `path`.
pub fn save_mesh(path: &Path, mesh: &TriangleMesh) -> DesignResult<()> {
    let io_error = |source| DesignError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    write_stl(&mut writer, mesh).map_err(io_error)?;
    writer.flush().map_err(io_error)?;

    log::info!("Exported {} facets to {:?}", mesh.face_count(), path);
    let degenerate = mesh.degenerate_count();
    if degenerate > 0 {
        log::debug!("{} zero-area facets at seams and poles", degenerate);
    }
    Ok(())
}

/// Read every facet from an STL stream.
pub fn read_facets<R: Read + Seek>(reader: &mut R) -> std::io::Result<Vec<Facet>> {
    stl_io::create_stl_reader(reader)?
        .map(|t| t.map(|t| Facet::from(&t)))
        .collect()
}

/// Read every facet from the STL file at `path`.
pub fn read_stl(path: &Path) -> DesignResult<Vec<Facet>> {
    let file = File::open(path).map_err(|source| DesignError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);
    let facets = read_facets(&mut reader).map_err(|e| DesignError::StlParse {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    log::debug!("Read {} facets from {:?}", facets.len(), path);
    Ok(facets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn triangle_mesh() -> TriangleMesh {
        let points = PointCloud::new(vec![0.0, 1.0, 0.0], vec![0.0, 0.0, 1.0], vec![0.5, 0.5, 0.5]);
        TriangleMesh::new(&points, &Triangulation::new(vec![[0, 1, 2]]))
    }

    #[test]
    fn binary_layout_matches_stl() {
        let mut bytes = Vec::new();
        write_stl(&mut bytes, &triangle_mesh()).unwrap();
        assert_eq!(bytes.len(), 80 + 4 + 50);
        assert!(bytes[..80].iter().all(|&b| b == 0));
        assert_eq!(u32::from_le_bytes(bytes[80..84].try_into().unwrap()), 1);
        // normal (0, 0, 1)
        assert_eq!(f32::from_le_bytes(bytes[92..96].try_into().unwrap()), 1.0);
        // second vertex x
        assert_eq!(f32::from_le_bytes(bytes[108..112].try_into().unwrap()), 1.0);
        // attribute
        assert_eq!(&bytes[132..134], &[0, 0]);
    }

    #[test]
    fn facets_read_back_from_memory() {
        let mesh = triangle_mesh();
        let mut bytes = Vec::new();
        write_stl(&mut bytes, &mesh).unwrap();
        let facets = read_facets(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(facets, mesh.facets().collect::<Vec<_>>());
    }

    #[test]
    fn unwritable_path_is_an_io_error() {
        let points = PointCloud::new(vec![0.0; 3], vec![0.0; 3], vec![0.0; 3]);
        let triangulation = Triangulation::new(vec![[0, 1, 2]]);
        let path = Path::new("/nonexistent-directory/design.stl");
        let err = export_stl(path, &points, &triangulation).unwrap_err();
        assert!(matches!(err, DesignError::Io { .. }));
        // The geometry is untouched and can be exported elsewhere.
        assert_eq!(points.len(), 3);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            read_stl(Path::new("/nonexistent-directory/missing.stl")),
            Err(DesignError::Io { .. })
        ));
    }
}

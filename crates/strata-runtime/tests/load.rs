use std::fs::File;
use std::path::Path;

use strata_runtime::Elevations;
use strata_world::{InputParams, RasterSource};
use tiff::encoder::{TiffEncoder, colortype};

fn write_tiff(path: &Path, data: &[f32]) {
    let mut enc = TiffEncoder::new(File::create(path).unwrap()).unwrap();
    enc.write_image::<colortype::Gray32Float>(2, 1, data).unwrap();
}

fn source(dir: &Path, name: &str, data: &[f32], nodata: f64) -> RasterSource {
    let path = dir.join(name);
    write_tiff(&path, data);
    RasterSource { path, nodata }
}

#[test]
fn each_raster_uses_its_own_sentinel() {
    let tmp = tempfile::tempdir().unwrap();
    let input = InputParams {
        bed: source(tmp.path(), "bed.tif", &[-9999.0, 32767.0], -9999.0),
        surface: source(tmp.path(), "surf.tif", &[32767.0, -1.0], -1.0),
        thickness: source(tmp.path(), "thick.tif", &[32767.0, 0.5], 32767.0),
    };
    let elev = Elevations::load(&input).unwrap();
    assert_eq!(elev.shape(), (1, 2));

    // bed: only its own sentinel becomes NaN
    let a = elev.cell(0, 0);
    assert!(a.bed.is_nan());
    assert_eq!(a.surf, 32767.0);
    assert_eq!(a.thick, 0.0);

    let b = elev.cell(0, 1);
    assert_eq!(b.bed, 32767.0);
    assert_eq!(b.surf, 0.0);
    assert_eq!(b.thick, 0.5);
}

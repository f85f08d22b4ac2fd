use pyo3::prelude::*;

/// A Python module implemented in Rust.
#[pymodule]
fn wondev(py: Python, m: &PyModule) -> PyResult<()> {
    m.add(
        "IllegalActionException",
        py.get_type::<::wondev::IllegalActionException>(),
    )?;
    m.add(
        "InvalidBoardException",
        py.get_type::<::wondev::InvalidBoardException>(),
    )?;
    m.add("ACTION_SPACE_SIZE", ::wondev::ACTION_SPACE_SIZE)?;
    m.add("PASS", ::wondev::Action::PASS.0)?;
    m.add_class::<::wondev::Game>()?;
    m.add_class::<::wondev::Board>()?;
    Ok(())
}

//! Campus station layout.
//!
//! Eight docking stations on a university campus, coordinates in metres
//! from the library steps.

use rb_core::Point2;
use rb_network::{NetworkResult, StationNetwork, StationNetworkBuilder};

/// Build the campus network.  Link weights are straight-line distances.
pub fn build_network() -> NetworkResult<StationNetwork> {
    let mut b = StationNetworkBuilder::with_capacity(8, 11);

    let library     = b.add_station("Library",      Point2::new(   0.0,    0.0))?;
    let union       = b.add_station("Union",        Point2::new( 400.0,    0.0))?;
    let gym         = b.add_station("Gym",          Point2::new( 800.0,  100.0))?;
    let dorms_north = b.add_station("Dorms North",  Point2::new(   0.0,  600.0))?;
    let dorms_south = b.add_station("Dorms South",  Point2::new( 400.0, -500.0))?;
    let engineering = b.add_station("Engineering",  Point2::new( 800.0,  600.0))?;
    let stadium     = b.add_station("Stadium",      Point2::new(1300.0,  300.0))?;
    let transit     = b.add_station("Transit Hub",  Point2::new(1200.0, -400.0))?;

    b.add_link(library,     union);
    b.add_link(library,     dorms_north);
    b.add_link(union,       gym);
    b.add_link(union,       engineering);
    b.add_link(union,       dorms_south);
    b.add_link(dorms_north, engineering);
    b.add_link(gym,         engineering);
    b.add_link(gym,         stadium);
    b.add_link(gym,         transit);
    b.add_link(engineering, stadium);
    b.add_link(dorms_south, transit);

    Ok(b.build())
}

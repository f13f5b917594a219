use crate::clock::Clock;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::garage::Garage;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Occupied,
    Free,
}

impl StatusFilter {
    fn keeps(&self, occupied: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Occupied => occupied,
            StatusFilter::Free => !occupied,
        }
    }
}

pub fn run<C: Clock>(garage: &Garage<C>, filter: StatusFilter) -> Result<CmdResult> {
    let spaces = garage
        .status()
        .into_iter()
        .filter(|s| filter.keeps(s.is_occupied()))
        .collect();
    Ok(CmdResult::default()
        .with_spaces(spaces)
        .with_occupancy(garage.summary()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Pricing;
    use crate::model::VehicleKind;

    fn garage() -> Garage {
        let garage = Garage::new(4, Pricing::default().rate_table()).unwrap();
        garage.park(VehicleKind::Car, "A").unwrap();
        garage.park(VehicleKind::Bus, "B").unwrap();
        garage.move_vehicle("A", Some(3)).unwrap();
        garage
    }

    #[test]
    fn all_spaces_in_index_order() {
        let result = run(&garage(), StatusFilter::All).unwrap();
        let indexes: Vec<_> = result.spaces.iter().map(|s| s.index).collect();
        assert_eq!(indexes, vec![0, 1, 2, 3]);

        let occupancy = result.occupancy.unwrap();
        assert_eq!((occupancy.capacity, occupancy.occupied), (4, 2));
        assert_eq!(occupancy.free(), 2);
    }

    #[test]
    fn filters_by_occupancy() {
        let garage = garage();
        let occupied = run(&garage, StatusFilter::Occupied).unwrap();
        let indexes: Vec<_> = occupied.spaces.iter().map(|s| s.index).collect();
        assert_eq!(indexes, vec![1, 3]);

        let free = run(&garage, StatusFilter::Free).unwrap();
        let indexes: Vec<_> = free.spaces.iter().map(|s| s.index).collect();
        assert_eq!(indexes, vec![0, 2]);
    }
}

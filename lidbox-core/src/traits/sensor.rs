//! Proximity sensor trait

/// Boolean motion detector in front of the box
pub trait ProximityDetector {
    /// Block while the sensor settles, then watch for movement
    ///
    /// Returns true as soon as a reading deviates from the first reading by
    /// more than `threshold` raw units (either direction) or crosses the
    /// sensor's absolute ceiling; false once the observation window has
    /// elapsed without such an excursion.
    fn detect(&mut self, threshold: u16) -> bool;
}

impl<P: ProximityDetector + ?Sized> ProximityDetector for &mut P {
    fn detect(&mut self, threshold: u16) -> bool {
        (**self).detect(threshold)
    }
}

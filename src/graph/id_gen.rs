/// Probes increasing integers for a free node id.
///
/// The seed only moves forward, so an id that was once skipped or handed out
/// is never probed again.
#[derive(Clone, Debug, Default)]
pub struct IdGenerator {
	seed: u64,
}

impl IdGenerator {
	pub fn new(seed: u64) -> Self {
		Self { seed }
	}

	/// Current probe position.
	pub fn seed(&self) -> u64 {
		self.seed
	}

	/// Returns the first id at or after the seed accepted by `is_free`.
	///
	/// The id is not reserved: until the caller inserts it, the next call
	/// returns the same value.
	pub fn next_id(&mut self, is_free: impl Fn(&str) -> bool) -> String {
		let mut id = self.seed.to_string();
		while !is_free(&id) {
			self.seed += 1;
			id = self.seed.to_string();
		}
		id
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;

	#[test]
	fn skips_taken_ids() {
		let taken: HashSet<&str> = ["0", "1"].into();
		let mut ids = IdGenerator::default();
		assert_eq!(ids.next_id(|id| !taken.contains(id)), "2");
	}

	#[test]
	fn repeats_until_the_id_is_used() {
		let mut ids = IdGenerator::default();
		assert_eq!(ids.next_id(|_| true), "0");
		assert_eq!(ids.next_id(|_| true), "0");
		assert_eq!(ids.next_id(|id| id != "0"), "1");
	}

	#[test]
	fn seed_never_moves_back() {
		let mut taken: HashSet<String> = ["0", "1"].iter().map(|s| s.to_string()).collect();
		let mut ids = IdGenerator::new(0);
		let issued = ids.next_id(|id| !taken.contains(id));
		assert_eq!(issued, "2");
		taken.insert(issued);

		// Even with the low ids free again, the generator keeps going up.
		taken.remove("0");
		taken.remove("1");
		assert_eq!(ids.next_id(|id| !taken.contains(id)), "3");
		assert_eq!(ids.seed(), 3);
	}

	#[test]
	fn honours_a_custom_seed() {
		let mut ids = IdGenerator::new(10);
		assert_eq!(ids.next_id(|_| true), "10");
	}
}

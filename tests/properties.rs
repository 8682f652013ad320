use iconsynth::{ico_ladder, pack_ico, read_ico_directory, resample, IconEntry, Quality,
                Raster, ICNS_SIZES, ICO_SIZES};
use proptest::prelude::*;

fn raster_strategy() -> impl Strategy<Value = Raster> {
    (1u32..40, 1u32..40).prop_flat_map(|(width, height)| {
        let len = (width * height * 4) as usize;
        prop::collection::vec(any::<u8>(), len)
            .prop_map(move |data| Raster::new(width, height, data).unwrap())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn resample_hits_every_ladder_size(source in raster_strategy(), level in 0u8..=2) {
        let quality = Quality::from_level(level).unwrap();
        for &size in ICO_SIZES.iter().chain(ICNS_SIZES.iter()).filter(|&&s| s <= 256) {
            let output = resample(&source, size, quality).unwrap();
            prop_assert_eq!((output.width(), output.height()), (size, size));
        }
    }

    #[test]
    fn resample_to_own_size_is_identity(side in 1u32..32, fill in any::<[u8; 4]>()) {
        let source = Raster::from_pixel(side, side, fill).unwrap();
        prop_assert_eq!(resample(&source, side, Quality::High).unwrap(), source);
    }

    #[test]
    fn ico_blocks_are_in_bounds_and_disjoint(include_bmp in any::<bool>(),
                                             fill in any::<[u8; 4]>(),
                                             keep in 1usize..=7) {
        let entries: Vec<IconEntry> = ico_ladder(include_bmp)
            .into_iter()
            .take(keep)
            .map(|spec| {
                let raster = Raster::from_pixel(spec.size(), spec.size(), fill).unwrap();
                IconEntry::encode(&raster, spec).unwrap()
            })
            .collect();
        let file = pack_ico(&entries).unwrap();
        prop_assert_eq!(&file[0..4], b"\0\0\x01\0");
        prop_assert_eq!(u16::from_le_bytes([file[4], file[5]]) as usize, keep);
        let directory = read_ico_directory(&file).unwrap();
        let mut ranges: Vec<_> = directory.iter().map(|entry| entry.range()).collect();
        ranges.sort_by_key(|range| range.start);
        prop_assert!(ranges[0].start >= 6 + 16 * keep);
        for pair in ranges.windows(2) {
            prop_assert!(pair[0].end <= pair[1].start);
        }
        prop_assert!(ranges.iter().all(|range| range.end <= file.len()));
    }
}

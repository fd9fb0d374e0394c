/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2026 the tsdb-report authors
 */

use std::collections::BTreeMap;
use std::fmt::{self, Write};
use std::str::FromStr;

use super::{ParseError, chars_allowed_in_opentsdb};

#[derive(Clone, Debug, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct MetricTagName(String);

#[derive(Clone, Debug, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct MetricTagValue(String);

impl MetricTagName {
    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for MetricTagName {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseError::Empty);
        }
        chars_allowed_in_opentsdb(s)?;
        Ok(MetricTagName(s.to_string()))
    }
}

impl fmt::Display for MetricTagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl MetricTagValue {
    pub const EMPTY: MetricTagValue = MetricTagValue(String::new());

    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for MetricTagValue {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        chars_allowed_in_opentsdb(s)?;
        Ok(MetricTagValue(s.to_string()))
    }
}

impl fmt::Display for MetricTagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MetricTagMap {
    inner: BTreeMap<MetricTagName, MetricTagValue>,
}

impl MetricTagMap {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn insert(&mut self, name: MetricTagName, value: MetricTagValue) -> Option<MetricTagValue> {
        self.inner.insert(name, value)
    }

    #[inline]
    pub fn extend(&mut self, other: Self) {
        self.inner.extend(other.inner)
    }

    #[inline]
    pub fn get(&self, key: &MetricTagName) -> Option<&MetricTagValue> {
        self.inner.get(key)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&MetricTagName, &MetricTagValue)> {
        self.inner.iter()
    }

    /// Parse a `key=value,key=value` style section into this map. A bare key
    /// maps to the empty value, duplicate keys keep the last value, empty
    /// fields between delimiters are skipped.
    pub(crate) fn parse_section(
        &mut self,
        section: &str,
        assign_delimiter: u8,
        next_delimiter: u8,
    ) -> Result<(), ParseError> {
        let iter = TagKvIter::new(section.as_bytes(), assign_delimiter, next_delimiter);
        for r in iter {
            let (name, value) = r?;
            self.inner.insert(name, value);
        }
        Ok(())
    }
}

impl fmt::Display for MetricTagMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.inner.iter();
        let Some((name, value)) = iter.next() else {
            return Ok(());
        };
        f.write_str(name.as_str())?;
        f.write_char('=')?;
        f.write_str(value.as_str())?;

        for (name, value) in iter {
            f.write_char(',')?;
            f.write_str(name.as_str())?;
            f.write_char('=')?;
            f.write_str(value.as_str())?;
        }
        Ok(())
    }
}

struct TagKvIter<'a> {
    data: &'a [u8],
    assign_delimiter: u8,
    next_delimiter: u8,
    offset: usize,
}

impl<'a> TagKvIter<'a> {
    fn new(data: &'a [u8], assign_delimiter: u8, next_delimiter: u8) -> Self {
        TagKvIter {
            data,
            assign_delimiter,
            next_delimiter,
            offset: 0,
        }
    }

    fn next_field(&mut self) -> Option<&'a [u8]> {
        if self.offset >= self.data.len() {
            return None;
        }

        let left = &self.data[self.offset..];
        match memchr::memchr(self.next_delimiter, left) {
            Some(p) => {
                self.offset += p + 1;
                Some(&left[..p])
            }
            None => {
                self.offset = self.data.len();
                Some(left)
            }
        }
    }
}

impl Iterator for TagKvIter<'_> {
    type Item = Result<(MetricTagName, MetricTagValue), ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let part = self.next_field()?;
            if part.is_empty() {
                continue;
            }

            return match memchr::memchr(self.assign_delimiter, part) {
                Some(p) => match parse_tag_name(&part[..p]) {
                    Ok(name) => {
                        if p + 1 >= part.len() {
                            Some(Ok((name, MetricTagValue::EMPTY)))
                        } else {
                            match parse_tag_value(&part[p + 1..]) {
                                Ok(value) => Some(Ok((name, value))),
                                Err(e) => Some(Err(e)),
                            }
                        }
                    }
                    Err(e) => Some(Err(e)),
                },
                None => match parse_tag_name(part) {
                    Ok(name) => Some(Ok((name, MetricTagValue::EMPTY))),
                    Err(e) => Some(Err(e)),
                },
            };
        }
    }
}

fn parse_tag_name(buf: &[u8]) -> Result<MetricTagName, ParseError> {
    let name = std::str::from_utf8(buf).map_err(|_| ParseError::NotAlphaNumeric)?;
    MetricTagName::from_str(name)
}

fn parse_tag_value(buf: &[u8]) -> Result<MetricTagValue, ParseError> {
    let value = std::str::from_utf8(buf).map_err(|_| ParseError::NotAlphaNumeric)?;
    MetricTagValue::from_str(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag_name(s: &str) -> MetricTagName {
        MetricTagName::from_str(s).unwrap()
    }

    #[test]
    fn parse_section_multi() {
        let mut map = MetricTagMap::default();
        map.parse_section("daemon_group=test,server=test-tls,online=y", b'=', b',')
            .unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map.get(&tag_name("daemon_group")).unwrap().as_str(), "test");
        assert_eq!(map.get(&tag_name("server")).unwrap().as_str(), "test-tls");
        assert_eq!(map.get(&tag_name("online")).unwrap().as_str(), "y");
    }

    #[test]
    fn parse_section_bare_key() {
        let mut map = MetricTagMap::default();
        map.parse_section("region,zone=a", b'=', b',').unwrap();
        assert_eq!(map.get(&tag_name("region")).unwrap().as_str(), "");
        assert_eq!(map.get(&tag_name("zone")).unwrap().as_str(), "a");
    }

    #[test]
    fn parse_section_duplicate_key() {
        let mut map = MetricTagMap::default();
        map.parse_section("k=1,k=2", b'=', b',').unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&tag_name("k")).unwrap().as_str(), "2");
    }

    #[test]
    fn parse_section_invalid() {
        let mut map = MetricTagMap::default();
        assert!(map.parse_section("k=a b", b'=', b',').is_err());
        assert!(map.parse_section("=v", b'=', b',').is_err());
    }

    #[test]
    fn tag_name_charset() {
        assert!(MetricTagName::from_str("abc-1").is_ok());
        assert!(MetricTagName::from_str("a=b").is_err());
        assert!(MetricTagName::from_str("").is_err());
    }

    #[test]
    fn display() {
        let mut map = MetricTagMap::default();
        map.parse_section("b=2,a=1", b'=', b',').unwrap();
        assert_eq!(map.to_string(), "a=1,b=2");
    }
}

//! S3 wire-format XML for the fake endpoint

/// Generate request ID (simplified)
fn request_id() -> String {
    uuid::Uuid::new_v4()
        .to_string()
        .replace('-', "")
        .to_uppercase()
}

fn timestamp() -> String {
    chrono::Utc::now()
        .format("%Y-%m-%dT%H:%M:%S.000Z")
        .to_string()
}

/// Escape XML special characters
pub fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// One `<Contents>` entry in a listing response.
#[derive(Debug, Clone)]
pub struct ObjectEntry {
    pub key: String,
    pub size: usize,
    pub etag: String,
}

/// Format an S3 error response as XML
pub fn format_error(code: &str, message: &str, resource: &str) -> String {
    let resource_line = if resource.is_empty() {
        String::new()
    } else {
        format!("  <Resource>{}</Resource>\n", xml_escape(resource))
    };

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<Error>
  <Code>{}</Code>
  <Message>{}</Message>
{}  <RequestId>{}</RequestId>
</Error>"#,
        code,
        xml_escape(message),
        resource_line,
        request_id()
    )
}

/// Format ListBuckets response
pub fn format_list_buckets(buckets: &[String]) -> String {
    let bucket_entries: String = buckets
        .iter()
        .map(|name| {
            format!(
                r#"    <Bucket>
      <Name>{}</Name>
      <CreationDate>{}</CreationDate>
    </Bucket>"#,
                xml_escape(name),
                timestamp()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ListAllMyBucketsResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
  <Owner>
    <ID>000000000000</ID>
    <DisplayName>bucketview-test</DisplayName>
  </Owner>
  <Buckets>
{}
  </Buckets>
</ListAllMyBucketsResult>"#,
        bucket_entries
    )
}

/// Format ListObjectsV2 response
pub fn format_list_objects(
    bucket: &str,
    prefix: &str,
    entries: &[ObjectEntry],
    common_prefixes: &[String],
) -> String {
    let contents: String = entries
        .iter()
        .map(|obj| {
            format!(
                r#"  <Contents>
    <Key>{}</Key>
    <LastModified>{}</LastModified>
    <ETag>{}</ETag>
    <Size>{}</Size>
    <StorageClass>STANDARD</StorageClass>
  </Contents>"#,
                xml_escape(&obj.key),
                timestamp(),
                xml_escape(&obj.etag),
                obj.size
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let prefixes: String = common_prefixes
        .iter()
        .map(|p| {
            format!(
                r#"  <CommonPrefixes>
    <Prefix>{}</Prefix>
  </CommonPrefixes>"#,
                xml_escape(p)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ListBucketResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
  <Name>{}</Name>
  <Prefix>{}</Prefix>
  <Delimiter>/</Delimiter>
  <KeyCount>{}</KeyCount>
  <MaxKeys>1000</MaxKeys>
  <IsTruncated>false</IsTruncated>
{}
{}
</ListBucketResult>"#,
        xml_escape(bucket),
        xml_escape(prefix),
        entries.len() + common_prefixes.len(),
        contents,
        prefixes
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_covers_markup_characters() {
        assert_eq!(xml_escape("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&apos;");
    }

    #[test]
    fn test_error_includes_code_and_resource() {
        let xml = format_error("NoSuchKey", "The specified key does not exist.", "/docs/a.txt");
        assert!(xml.contains("<Code>NoSuchKey</Code>"));
        assert!(xml.contains("<Resource>/docs/a.txt</Resource>"));
        assert!(xml.contains("<RequestId>"));
    }

    #[test]
    fn test_listing_counts_keys_and_prefixes() {
        let entries = vec![ObjectEntry {
            key: "readme.txt".to_string(),
            size: 5,
            etag: "\"abc\"".to_string(),
        }];
        let xml = format_list_objects("docs", "", &entries, &["reports/".to_string()]);
        assert!(xml.contains("<KeyCount>2</KeyCount>"));
        assert!(xml.contains("<Key>readme.txt</Key>"));
        assert!(xml.contains("<Prefix>reports/</Prefix>"));
    }
}
